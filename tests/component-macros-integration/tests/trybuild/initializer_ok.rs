use component_macros::initializer;
use infrastructure_common::{BoxError, Initializable, HIGHEST_PRECEDENCE};

#[initializer(order = -5)]
#[derive(Default)]
pub struct EarlyMigration;

impl Initializable for EarlyMigration {
    fn init(&self) -> Result<(), BoxError> {
        Ok(())
    }
}

#[initializer(order = HIGHEST_PRECEDENCE)]
#[derive(Default)]
pub struct First;

impl Initializable for First {
    fn init(&self) -> Result<(), BoxError> {
        Ok(())
    }
}

#[initializer]
#[derive(Default)]
pub struct Unordered;

impl Initializable for Unordered {
    fn init(&self) -> Result<(), BoxError> {
        Ok(())
    }
}

fn main() {}
