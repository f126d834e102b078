use std::fs::File;
use std::io;
use std::sync::mpsc;
use std::thread;

use okerr::{err, ok, Result};

fn main() {
    let path = "foo.txt"; // <------------------- Does not exist.

    match file_summary(path) {
        Result::Ok(summary) => {
            println!("{}", summary.value());
        }
        Result::Err(e) => {
            println!("Err: {}", e);
            for (index, link) in e.cause_chain().enumerate() {
                println!("   {}: {}", index, link);
            }
        }
    }
}

fn open_file(path: &str) -> Result<File, io::Error> {
    File::open(path).into() // <----------------- `Err::primitive` keeps the io::Error as the code.
}

fn file_summary(path: &'static str) -> Result<String, &'static str, &'static str> {
    let (tx, rx) = mpsc::channel();

    // Open the file on a separate thread, send the result to this thread.
    thread::spawn(move || {
        let _ = tx.send(open_file(path));
    });

    let file = match rx.recv() {
        std::result::Result::Ok(Result::Ok(file)) => file.into_value(),
        std::result::Result::Ok(Result::Err(e)) => {
            let (io_error, _) = e.into_parts();
            return err("OpenFailed").with_info(path).with_cause(io_error).into();
        }
        std::result::Result::Err(_) => return err("WorkerGone").with_info(path).into(),
    };

    match file.metadata() {
        std::result::Result::Ok(metadata) => ok(format!("{}: {} bytes", path, metadata.len())).into(),
        std::result::Result::Err(e) => err("StatFailed").with_info(path).with_cause(e).into(),
    }
}
