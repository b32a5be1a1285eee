pub fn run() {
    println!("marksearch {}", env!("CARGO_PKG_VERSION"));
}
