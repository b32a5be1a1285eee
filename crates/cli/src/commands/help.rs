pub fn run() {
    println!("Available commands:");
    println!();
    println!("  -search <FILE> <QUERY>  Search a document (--case-sensitive, --whole-word, --regex, --page N)");
    println!("  -version                Show version information");
    println!("  -help                   Show this help message");
    println!("  -edit-config            Open config file in editor");
    println!("  -show-config            Display current configuration");
    println!("  -validate-config        Validate configuration file");
}
