use console::style;

pub struct Display;

impl Display {
    pub fn new() -> Self {
        Self
    }

    pub fn print_header(&self, text: &str) {
        println!();
        println!("{}", style(text).bold().cyan());
        println!("{}", style("═".repeat(60)).dim());
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("{} {}", style("error:").bold().red(), message);
    }

    pub fn print_status(&self, message: &str) {
        println!("{} {}", style("»").bold().cyan(), message);
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
