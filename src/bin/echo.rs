use rust_calculator::{server, Endpoint};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    server::run(Endpoint::Echo)
}
