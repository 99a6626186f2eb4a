use std::io::{self, Write};

use chaindict::{Config, LoadError, passwd, report};
use clap::Parser;
use collections::Dict;
use log::{debug, trace};

fn main() -> Result<(), LoadError> {
    env_logger::builder().init();

    let cfg = Config::parse();
    trace!("config: {:#?}", cfg);

    let mut dict = Dict::new(cfg.initial_size)?;
    passwd::load_file(&cfg.file, &mut dict, cfg.name_field)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    report::write_lookups(&mut out, &dict, cfg.lookups.as_slice())?;
    report::write_summary(&mut out, &dict)?;

    for _ in 0..cfg.grow {
        dict.grow()?;
        debug!(target: "grow", "{}", dict.stats());
        report::write_summary(&mut out, &dict)?;
    }

    out.flush()?;
    Ok(())
}
