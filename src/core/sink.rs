//! Sink trait for log output destinations

use super::{error::Result, record::Record};

pub trait Sink: Send + Sync {
    fn write(&mut self, record: &Record) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
