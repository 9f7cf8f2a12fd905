use wiimap::compile;

fn main() {
    let text = "
        # This is a comment
        Wiimote.1 = PROG_CHG(1) # This is also a comment
        # Wiimote.2 = PROG_CHG(2)
    ";

    match compile(text).into_result() {
        Ok(registry) => print!("{}", registry),
        Err(diagnostics) => println!("{:?}", diagnostics),
    }
}
