use kasa::error::Result;
use kasa::store;

use crate::cli::store_path;

pub fn run() -> Result<()> {
    let path = store_path();
    println!("Store: {}", path.display());

    if path.exists() {
        let transactions = store::load(&path);
        println!("Transactions: {}", transactions.len());
    } else {
        println!("Transactions: 0 (no store yet — run `kasa import <file>`)");
    }

    Ok(())
}
