//! Plain-text rendering of the two pages.

use std::io::{self, Write};

use crate::view::{ListView, MemoryDocument, CONTENT, NEXT_BTN, PAGE_SIZE, PREV_BTN, TITLE};

pub fn print_list(out: &mut impl Write, view: &ListView, doc: &MemoryDocument) -> io::Result<()> {
    let total = view.posts().len();
    let pages = total.div_ceil(PAGE_SIZE).max(1);
    writeln!(out, "Halaman {}/{pages} ({total} cerita)", view.current_page())?;
    for (i, post) in view.visible().iter().enumerate() {
        writeln!(out, "{:>3}. {}", i + 1, post.title)?;
        writeln!(out, "     {}", view.link(post))?;
    }
    writeln!(
        out,
        "[{}] [{}] [r] acak  [q] keluar",
        control(doc, PREV_BTN, "p"),
        control(doc, NEXT_BTN, "n")
    )
}

fn control<'a>(doc: &MemoryDocument, id: &str, key: &'a str) -> &'a str {
    if doc.is_disabled(id) {
        "-"
    } else {
        key
    }
}

pub fn print_detail(out: &mut impl Write, doc: &MemoryDocument) -> io::Result<()> {
    let title = doc.text(TITLE).unwrap_or_default();
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))?;
    writeln!(out, "{}", doc.html(CONTENT).unwrap_or_default())
}
