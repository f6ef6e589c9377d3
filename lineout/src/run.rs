use lineout_core::config::Settings;
use lineout_core::reporter::{Reporter, run_stream};
use std::io::{self, BufWriter};

pub fn run(settings: Settings) -> io::Result<()> {
    let stdin = io::stdin();
    let reader = stdin.lock();
    let stdout = io::stdout();
    let writer = BufWriter::new(stdout.lock());

    let mut reporter = Reporter::new(settings);
    run_stream(reader, writer, &mut reporter)
}
