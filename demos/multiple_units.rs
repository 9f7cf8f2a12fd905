use wiimap::{BindingRegistry, Compiler, CompilerConfig, Recovery};

fn main() {
    let units = [
        "Wiimote.A = NOTE(60, 100)",
        "Wiimote.A.Release = PROG_CHG(3)\nWiimote.B = oops",
        "Nunchuk.Z = NOTE(36, 127, 9)",
    ];

    let compiler = Compiler::new(CompilerConfig::default().with_recovery(Recovery::Abort));
    let mut registry = BindingRegistry::new();

    for unit in units.iter() {
        for diagnostic in compiler.compile_into(unit, &mut registry) {
            println!("{}: {}", diagnostic.location, diagnostic);
        }
    }

    print!("{}", registry);
}
