//! SQL dialects the query builder can render for.

use core::fmt::Write;

/// Target store dialect.
///
/// Only placeholder syntax differs between the supported stores; both accept
/// double-quoted identifiers and `WITH RECURSIVE ... UNION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    #[default]
    SQLite,
    PostgreSQL,
}

impl Dialect {
    /// Renders a placeholder for this dialect with the given 1-based index.
    ///
    /// # Examples
    /// - PostgreSQL: `$1`, `$2`, `$3`
    /// - SQLite: `?`
    pub fn render_placeholder(&self, index: usize) -> String {
        let mut buf = String::with_capacity(4);
        write_placeholder(*self, index, &mut buf);
        buf
    }
}

/// Writes the placeholder for `index` directly into `buf`.
#[inline]
pub(crate) fn write_placeholder(dialect: Dialect, index: usize, buf: &mut impl Write) {
    match dialect {
        Dialect::SQLite => {
            let _ = buf.write_char('?');
        }
        Dialect::PostgreSQL => {
            let _ = write!(buf, "${}", index);
        }
    }
}
