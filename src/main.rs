use miette::Report;
use quill::environment::Environment;
use quill::error::QuillError;
use quill::interpreter::Interpreter;
use quill::lexer::Lexer;
use quill::object::Object;
use quill::parser::Parser;
use std::cell::RefCell;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::process;
use std::rc::Rc;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 {
        run_file(&args[1]);
    } else {
        repl();
    }
}

fn run_file(filename: &str) {
    let contents = fs::read_to_string(filename).unwrap_or_else(|err| {
        eprintln!("could not read {}: {}", filename, err);
        process::exit(1);
    });

    let lexer = Lexer::new(&contents);
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();

    if !parser.errors.is_empty() {
        for err in parser.errors {
            let report =
                Report::new(QuillError::from(err)).with_source_code(contents.clone());
            eprintln!("{:?}", report);
        }
        process::exit(1);
    }

    let env = Rc::new(RefCell::new(Environment::new()));
    let interpreter = Interpreter::new();
    let result = interpreter.eval_program(&program, &env);
    if result != Object::Null {
        println!("{}", result);
    }
}

fn repl() {
    println!("Quill {}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' to quit.");

    let env = Rc::new(RefCell::new(Environment::new()));
    let interpreter = Interpreter::new();

    loop {
        print!(">> ");
        io::stdout().flush().expect("failed to flush stdout");

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("could not read input: {}", err);
                break;
            }
        }

        if input.trim() == "exit" {
            break;
        }

        let lexer = Lexer::new(&input);
        let mut parser = Parser::new(lexer);
        let program = parser.parse_program();

        if !parser.errors.is_empty() {
            for err in parser.errors {
                let report =
                    Report::new(QuillError::from(err)).with_source_code(input.clone());
                eprintln!("{:?}", report);
            }
            continue;
        }

        let result = interpreter.eval_program(&program, &env);
        if result != Object::Null {
            println!("{}", result);
        }
    }
}
