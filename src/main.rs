use std::env;
use std::fs;
use std::process;

use tracing::{error, info};

use wiimap::Compiler;

const DEMO: &str = "
    # Wiimote.A plays a note and stops it again on release
    Wiimote.A = NOTE(60, 100)

    # both arrows together select the fifth program
    (Wiimote.Left + Wiimote.Right) = PROG_CHG(5)

    # plus and minus walk through the programs
    Wiimote.Plus = PROG_CHG+
    Wiimote.Minus = PROG_CHG-

    Nunchuk.Z.Press = NOTE(36, 127, 9)
    Nunchuk.Z.Release = NOTE(36, 0, 9)
";

fn main() {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let text = match env::args().nth(1) {
        Some(path) => match fs::read_to_string(&path) {
            Ok(text) => {
                info!("Compiling {}", path);
                text
            }
            Err(err) => {
                error!("Failed to read {}: {}", path, err);
                process::exit(1);
            }
        },
        None => DEMO.to_string(),
    };

    let compilation = Compiler::default().compile(&text);

    for diagnostic in &compilation.diagnostics {
        println!("{}: {}", diagnostic.location, diagnostic);
    }

    print!("{}", compilation.registry);

    if !compilation.is_ok() {
        process::exit(1);
    }
}
