use quill::lexer::Lexer;
use quill::token::Token;
use std::env;
use std::fs;
use std::process;

/// Dumps the token stream of a script, one token per line with its span.
fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: quill-tokens <script>");
        process::exit(1);
    }

    let input = fs::read_to_string(&args[1]).unwrap_or_else(|err| {
        eprintln!("could not read {}: {}", &args[1], err);
        process::exit(1);
    });

    let mut lexer = Lexer::new(&input);
    loop {
        let (token, span) = lexer.next_token();
        println!("{}..{}\t{:?}", span.start, span.end, token);
        if token == Token::EOF {
            break;
        }
    }
}
