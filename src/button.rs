use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub enum Device {
    Wiimote,
    Nunchuk,
}

impl Device {
    pub fn name(self) -> &'static str {
        match self {
            Device::Wiimote => "Wiimote",
            Device::Nunchuk => "Nunchuk",
        }
    }

    /// Button names the scanner recognizes for this family.
    pub fn button_names(self) -> &'static [&'static str] {
        match self {
            Device::Wiimote => &[
                "A", "B", "Left", "Right", "Up", "Down", "Minus", "Plus", "Home", "1", "2",
            ],
            Device::Nunchuk => &["C", "Z"],
        }
    }
}

impl Display for Device {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum WiimoteButton {
    Two,
    One,
    B,
    A,
    Minus,
    Home,
    Left,
    Right,
    Down,
    Up,
    Plus,
}

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum NunchukButton {
    Z,
    C,
}

/// A single physical input control.
///
/// Bit values follow the cwiid button report layout.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum ButtonCode {
    Wiimote(WiimoteButton),
    Nunchuk(NunchukButton),
}

impl ButtonCode {
    pub fn device(self) -> Device {
        match self {
            ButtonCode::Wiimote(_) => Device::Wiimote,
            ButtonCode::Nunchuk(_) => Device::Nunchuk,
        }
    }

    pub fn bit(self) -> u16 {
        match self {
            ButtonCode::Wiimote(button) => match button {
                WiimoteButton::Two => 0x0001,
                WiimoteButton::One => 0x0002,
                WiimoteButton::B => 0x0004,
                WiimoteButton::A => 0x0008,
                WiimoteButton::Minus => 0x0010,
                WiimoteButton::Home => 0x0080,
                WiimoteButton::Left => 0x0100,
                WiimoteButton::Right => 0x0200,
                WiimoteButton::Down => 0x0400,
                WiimoteButton::Up => 0x0800,
                WiimoteButton::Plus => 0x1000,
            },
            ButtonCode::Nunchuk(button) => match button {
                NunchukButton::Z => 0x01,
                NunchukButton::C => 0x02,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ButtonCode::Wiimote(button) => match button {
                WiimoteButton::Two => "2",
                WiimoteButton::One => "1",
                WiimoteButton::B => "B",
                WiimoteButton::A => "A",
                WiimoteButton::Minus => "Minus",
                WiimoteButton::Home => "Home",
                WiimoteButton::Left => "Left",
                WiimoteButton::Right => "Right",
                WiimoteButton::Down => "Down",
                WiimoteButton::Up => "Up",
                WiimoteButton::Plus => "Plus",
            },
            ButtonCode::Nunchuk(button) => match button {
                NunchukButton::Z => "Z",
                NunchukButton::C => "C",
            },
        }
    }
}

impl Display for ButtonCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.device(), self.name())
    }
}

#[derive(Debug, PartialEq, Copy, Clone)]
pub struct MixedDevices(pub Device, pub Device);

impl Display for MixedDevices {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot combine {} and {} buttons", self.0, self.1)
    }
}

impl Error for MixedDevices {}

/// A button or a chord of buttons of one device family.
///
/// Identities compare by device family and bitmask only, so the order and
/// multiplicity of the codes they were built from does not matter.
#[derive(Debug, Clone)]
pub struct ButtonId {
    device: Device,
    codes: Vec<ButtonCode>,
}

impl ButtonId {
    pub fn new(code: ButtonCode) -> Self {
        Self {
            device: code.device(),
            codes: vec![code],
        }
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn codes(&self) -> &[ButtonCode] {
        &self.codes
    }

    pub fn mask(&self) -> u16 {
        self.codes.iter().fold(0, |mask, code| mask | code.bit())
    }

    /// Combines two identities into a chord. Returns `self` untouched when
    /// `other` contributes no new bit.
    pub fn union(self, other: &ButtonId) -> Result<ButtonId, MixedDevices> {
        if self.device != other.device {
            return Err(MixedDevices(self.device, other.device));
        }

        if self.mask() | other.mask() == self.mask() {
            return Ok(self);
        }

        let mut codes = self.codes;
        codes.extend_from_slice(&other.codes);

        Ok(ButtonId {
            device: self.device,
            codes,
        })
    }

    /// True when every button of this identity is set in `held`.
    pub fn is_held(&self, device: Device, held: u16) -> bool {
        self.device == device && held & self.mask() == self.mask()
    }
}

impl PartialEq for ButtonId {
    fn eq(&self, other: &Self) -> bool {
        self.device == other.device && self.mask() == other.mask()
    }
}

impl Eq for ButtonId {}

impl Hash for ButtonId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.device.hash(state);
        self.mask().hash(state);
    }
}

impl PartialOrd for ButtonId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ButtonId {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.device, self.mask()).cmp(&(other.device, other.mask()))
    }
}

impl Display for ButtonId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, code) in self.codes.iter().enumerate() {
            if i != 0 {
                write!(f, "+")?;
            }

            write!(f, "{}", code)?;
        }

        Ok(())
    }
}

/// Read-only translation from `"<Device>.<Name>"` to a button code.
#[derive(Debug, Clone)]
pub struct ButtonTable {
    codes: BTreeMap<String, ButtonCode>,
}

impl ButtonTable {
    pub fn new<K: Into<String>>(entries: impl IntoIterator<Item = (K, ButtonCode)>) -> Self {
        Self {
            codes: entries
                .into_iter()
                .map(|(name, code)| (name.into(), code))
                .collect(),
        }
    }

    pub fn lookup(&self, device: Device, name: &str) -> Option<ButtonCode> {
        self.codes.get(&format!("{}.{}", device, name)).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for ButtonTable {
    fn default() -> Self {
        let codes = [
            ButtonCode::Wiimote(WiimoteButton::A),
            ButtonCode::Wiimote(WiimoteButton::B),
            ButtonCode::Wiimote(WiimoteButton::Left),
            ButtonCode::Wiimote(WiimoteButton::Right),
            ButtonCode::Wiimote(WiimoteButton::Up),
            ButtonCode::Wiimote(WiimoteButton::Down),
            ButtonCode::Wiimote(WiimoteButton::Minus),
            ButtonCode::Wiimote(WiimoteButton::Plus),
            ButtonCode::Wiimote(WiimoteButton::Home),
            ButtonCode::Wiimote(WiimoteButton::One),
            ButtonCode::Wiimote(WiimoteButton::Two),
            ButtonCode::Nunchuk(NunchukButton::C),
            ButtonCode::Nunchuk(NunchukButton::Z),
        ];

        Self::new(codes.iter().map(|code| (code.to_string(), *code)))
    }
}
