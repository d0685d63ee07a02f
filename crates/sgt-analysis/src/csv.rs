//! Minimal CSV writing: comma separator, RFC-style double-quote escaping.
//! Merged-table rows never need quoting, but raw mention titles can contain
//! commas and quotes, so every field goes through the same escape path.

use std::io::{self, Write};

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write one CSV record followed by a newline.
pub(crate) fn write_record<W: Write>(mut w: W, fields: &[String]) -> io::Result<()> {
    let mut first = true;
    for field in fields {
        if !first {
            write!(w, ",")?;
        } else {
            first = false;
        }
        if needs_quotes(field) {
            let escaped = field.replace('"', "\"\"");
            write!(w, "\"{escaped}\"")?;
        } else {
            write!(w, "{field}")?;
        }
    }
    writeln!(w)
}
