fn main() {
    match bestfirst::solver() {
        Ok(_) => {}
        Err(e) => eprintln!("{:#}", e),
    }
}
