// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Silakka CLI - Minimal Blocking HTTP Client
//!
//! Example usage and demonstration of the silakka library.

use std::env;
use std::process::ExitCode;

use silakka::{HttpClient, Response};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("silakka=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "fetch" => {
            if args.len() < 3 {
                eprintln!("Usage: silakka fetch <url>");
                return ExitCode::from(1);
            }
            fetch_url(&args[2])
        }
        "post" => {
            if args.len() < 4 {
                eprintln!("Usage: silakka post <url> <body>");
                return ExitCode::from(1);
            }
            post_url(&args[2], &args[3])
        }
        "cookies" => {
            if args.len() < 3 {
                eprintln!("Usage: silakka cookies <url>");
                return ExitCode::from(1);
            }
            show_cookies(&args[2])
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("silakka {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"Silakka - Minimal Blocking HTTP Client

USAGE:
    silakka <COMMAND> [OPTIONS]

COMMANDS:
    fetch <url>         Fetch a URL and display the response
    post <url> <body>   POST a form-encoded body to a URL
    cookies <url>       Fetch a URL and display the cookies it sets
    help                Show this help message
    version             Show version information

EXAMPLES:
    silakka fetch https://example.com
    silakka post https://example.com/search "q=hello"
    silakka cookies https://example.com/login

For more information, see: https://github.com/bountyyfi/silakka
"#
    );
}

fn fetch_url(url: &str) -> ExitCode {
    println!("Fetching: {}", url);

    let mut client = match HttpClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return ExitCode::from(1);
        }
    };

    match client.get(url) {
        Ok(response) => {
            print_response(&response);

            if !client.cookies().is_empty() {
                println!("\n=== Session cookies ===");
                println!("{}", client.cookies());
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to fetch URL: {}", e);
            ExitCode::from(1)
        }
    }
}

fn post_url(url: &str, body: &str) -> ExitCode {
    println!("Posting to: {}", url);

    let mut client = match HttpClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return ExitCode::from(1);
        }
    };

    match client.post(url, body.to_string()) {
        Ok(response) => {
            print_response(&response);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to post: {}", e);
            ExitCode::from(1)
        }
    }
}

fn show_cookies(url: &str) -> ExitCode {
    println!("Fetching cookies from: {}", url);

    let mut client = match HttpClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return ExitCode::from(1);
        }
    };

    match client.get(url) {
        Ok(response) => {
            let set_cookies = response.set_cookies();
            if set_cookies.is_empty() {
                println!("\nNo cookies set by this response");
            } else {
                println!("\n=== Set-Cookie headers ({}) ===", set_cookies.len());
                for cookie in &set_cookies {
                    println!("  - {}", cookie);
                }
                println!("\n=== Extracted cookie string ===");
                println!("{}", response.cookie_string());
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to fetch URL: {}", e);
            ExitCode::from(1)
        }
    }
}

fn print_response(response: &Response) {
    println!("\n=== Response ===");
    println!("Status: {}", response.status);
    println!("URL: {}", response.url);
    println!("Content-Type: {:?}", response.content_type());
    println!("Size: {} bytes", response.body_len());
    println!("Time: {}ms", response.response_time_ms);

    if response.is_redirect() {
        if let Some(location) = response.location() {
            println!("Location: {}", location);
        }
    }

    let text = response.text_lossy();
    if !text.is_empty() {
        println!("\n=== Body ===");
        let preview: String = text.chars().take(500).collect();
        println!("{}", preview);
        if text.chars().count() > 500 {
            println!("... ({} bytes total)", response.body_len());
        }
    }
}
