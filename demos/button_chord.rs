use wiimap::{compile, Device};

fn main() {
    let text = "
        (Wiimote.Left + Wiimote.Right) = PROG_CHG(1)
        ((Wiimote.A + Wiimote.B) + Wiimote.Home) = PROG_CHG(2)
        (Nunchuk.C + Nunchuk.Z) = NOTE(48, 90)
    ";

    let compilation = compile(text);

    match compilation.registry.resolve(Device::Wiimote, 0x0300) {
        Some((id, binding)) => println!("{} = {}", id, binding),
        None => println!("no binding for Left+Right"),
    }

    println!("{:?}", compilation);
}
