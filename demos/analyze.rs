use odecheck::analyze;

fn main() {
    let equations = [
        "(x+y)dx + (x-y)dy = 0",
        "y dx - x dy",
        "2xy dx + x^2 dy",
        "sin(y/x) dx + dy",
        "exp(x) dx + y dy",
    ];

    for equation in equations {
        match analyze(equation) {
            Ok(result) => {
                println!("{equation}");
                for line in result.summary().lines() {
                    println!("  {line}");
                }
            }
            Err(err) => eprintln!("cannot analyze {equation}: {err}"),
        }
    }
}
