//! Opens the input and output ends for a run. Stages only see `Read` / `Write`.
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};

use log::{debug, error};

/// Input from the named file, or stdin.
pub fn open_input(path: Option<&str>) -> io::Result<Box<dyn Read>> {
    match path {
        Some(name) => {
            let file = File::open(name).map_err(|e| {
                error!("Can't open {} for reading: {}", name, e);
                e
            })?;
            debug!("Reading from {}", name);
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Output to the named file (created or truncated), or stdout.
pub fn open_output(path: Option<&str>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(name) => {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(name)
                .map_err(|e| {
                    error!("Can't open {} for writing: {}", name, e);
                    e
                })?;
            debug!("Writing to {}", name);
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
