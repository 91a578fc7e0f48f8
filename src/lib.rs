pub mod batch;
pub mod config;
pub mod entrez;
pub mod errors;
mod runner;

use crate::errors::SeqfetchError;

pub fn run() -> Result<(), SeqfetchError> {
    runner::run()
}
