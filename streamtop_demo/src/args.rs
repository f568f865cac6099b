//! Flag/env parsing for the demo server binary, kept out of `main.rs` so it
//! stays unit-testable.

/// `--port N` / `-p N` / `--port=N`, then `STREAMTOP_DEMO_PORT`, then default.
pub fn parse_port<I: IntoIterator<Item = String>>(args: I, default_port: u16) -> u16 {
    let mut it = args.into_iter();
    let _ = it.next(); // program name
    let mut long: Option<String> = None;
    let mut short: Option<String> = None;
    while let Some(a) = it.next() {
        match a.as_str() {
            "--port" => long = it.next(),
            "-p" => short = it.next(),
            _ if a.starts_with("--port=") => {
                if let Some((_, v)) = a.split_once('=') {
                    long = Some(v.to_string());
                }
            }
            _ => {}
        }
    }
    long.or(short)
        .or_else(|| std::env::var("STREAMTOP_DEMO_PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(default_port)
}

/// `--secret PASS` / `-s PASS` / `--secret=PASS`, then `STREAMTOP_DEMO_SECRET`.
/// An empty value counts as no secret: privileged requests go unchecked.
pub fn parse_secret<I: IntoIterator<Item = String>>(args: I) -> Option<String> {
    let mut it = args.into_iter();
    let _ = it.next();
    let mut secret: Option<String> = None;
    while let Some(a) = it.next() {
        match a.as_str() {
            "--secret" | "-s" => secret = it.next(),
            _ if a.starts_with("--secret=") => {
                if let Some((_, v)) = a.split_once('=') {
                    secret = Some(v.to_string());
                }
            }
            _ => {}
        }
    }
    secret
        .or_else(|| std::env::var("STREAMTOP_DEMO_SECRET").ok())
        .filter(|s| !s.is_empty())
}
