use wiimap::{compile, Transition};

fn main() {
    let text = "
        Wiimote.A = NOTE(60, 100)
        Wiimote.B = NOTE(62, 100, 1)
        Wiimote.B.Release = NOTE(62, 0, 1)
    ";

    match compile(text).into_result() {
        Ok(registry) => {
            for (id, binding) in registry.iter() {
                for transition in [Transition::Press, Transition::Release].iter() {
                    if let Some(Ok(message)) = binding.emit(*transition) {
                        println!("{}.{} -> {}", id, transition, message);
                    }
                }
            }
        }
        Err(diagnostics) => {
            for diagnostic in diagnostics {
                println!("{}", diagnostic);
            }
        }
    }
}
