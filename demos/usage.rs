use std::fs::File;

use okerr::{err, ok, Result};

#[derive(Debug, PartialEq)]
enum SizeError {
    Unlucky,
    Io,
    TooSmall,
}

fn file_size(path: &str) -> Result<u64, SizeError, &str> {
    let size = match File::open(path).and_then(|file| file.metadata()) {
        std::result::Result::Ok(metadata) => metadata.len(),
        std::result::Result::Err(e) => {
            // The I/O error becomes the cause; the path goes into the info.
            return err(SizeError::Io).with_info(path).with_cause(e).into();
        }
    };

    if size < 1024 {
        return err(SizeError::TooSmall)
            .with_info(path)
            .with_message(format!("{} bytes", size))
            .into();
    }

    ok(size).into()
}

fn maybe_file_size(path: &str) -> Result<u64, SizeError, &str> {
    let lucky = (path.len() % 2) == 0;
    if !lucky {
        return err(SizeError::Unlucky).with_info(path).into();
    }

    file_size(path)
}

fn main() -> Result<(), &'static str> {
    match maybe_file_size("foo.txt") {
        Result::Ok(size) => println!("File size: {} KiB", *size / 1024),
        Result::Err(e) => {
            match e.error() {
                SizeError::Unlucky => println!("Not this time!"),
                SizeError::Io => println!("I/O error on {}", e.info()),
                SizeError::TooSmall => println!("File too small: {}", e.message().unwrap_or("?")),
            }

            if e.matches_code(SizeError::Io) {
                return err("Startup")
                    .with_message("could not size the input file")
                    .with_cause(e)
                    .into();
            }
        }
    }

    ok(()).into()
}
