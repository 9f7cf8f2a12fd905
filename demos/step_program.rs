use wiimap::{compile, Transition};

fn main() {
    let text = "
        Wiimote.Plus = PROG_CHG(10)+
        Wiimote.Minus = PROG_CHG(10)-
        Wiimote.Up = NOTE(60, 100)+12
    ";

    let registry = match compile(text).into_result() {
        Ok(registry) => registry,
        Err(diagnostics) => {
            println!("{:?}", diagnostics);
            return;
        }
    };

    for (id, binding) in registry.iter() {
        if let Some(action) = binding.action(Transition::Press) {
            for count in 0..3 {
                println!("{} #{}: {}", id, count, action.message.advanced(count));
            }
        }
    }
}
