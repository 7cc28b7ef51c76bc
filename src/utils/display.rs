use crate::tools::ToolInvokeMessage;
use colored::*;

pub fn print_header(text: &str) {
    println!("\n{}", text.bright_cyan().bold());
    println!("{}", "=".repeat(text.len()).bright_cyan());
}

pub fn print_success(text: &str) {
    println!("{}", text.green());
}

pub fn print_info(text: &str) {
    println!("{}", text.blue());
}

/// Print one tool message: text in blue, JSON pretty-printed
pub fn print_message(message: &ToolInvokeMessage) {
    match message {
        ToolInvokeMessage::Text(text) => print_info(text),
        ToolInvokeMessage::Json(value) => match serde_json::to_string_pretty(value) {
            Ok(pretty) => println!("{}", pretty),
            Err(_) => println!("{}", value),
        },
    }
}
