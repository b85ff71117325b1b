use kasa::error::Result;
use kasa::store;

use crate::cli::store_path;

pub fn run() -> Result<()> {
    store::clear(&store_path())?;
    println!("Stored transactions cleared.");
    Ok(())
}
