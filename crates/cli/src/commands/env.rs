//! Env command implementation: prints the field table of a section.

use anyhow::Result;
use svc_config::usage;

use crate::envelope::{Envelope, Keyed};

pub fn run<T: Keyed>() -> Result<()> {
    print!("{}", usage::<Envelope<T>>());
    Ok(())
}
