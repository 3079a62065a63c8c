use std::io;
use std::io::Write;
use tracing::error;
use crate::catalog::domain::service::Catalog;

impl Catalog {
    /// One line per shelved book, in shelving order.
    pub fn write_catalog<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for entry in self.books() {
            writeln!(out, "{}", entry.book)?;
        }
        Ok(())
    }

    /// One line per registered user, in registration order.
    pub fn write_users<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for user in self.users() {
            writeln!(out, "{}", user)?;
        }
        Ok(())
    }

    pub fn print_catalog(&self) {
        if let Err(err) = self.write_catalog(&mut io::stdout().lock()) {
            error!("failed to print catalog {:?}", err);
        }
    }

    pub fn print_users(&self) {
        if let Err(err) = self.write_users(&mut io::stdout().lock()) {
            error!("failed to print users {:?}", err);
        }
    }
}
