//! ANSI colour formatting and terminal output.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::rc::Rc;

/// Foreground colours supported by the printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextColor {
    /// Red text.
    Red,
    /// Green text.
    Green,
    /// Yellow text.
    Yellow,
    /// Blue text.
    Blue,
    /// Magenta text.
    Magenta,
    /// Cyan text.
    Cyan,
}

impl TextColor {
    /// SGR parameter selecting this colour.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
        }
    }
}

/// Background colours supported by the printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BgColor {
    /// Red background.
    Red,
    /// Green background.
    Green,
    /// Yellow background.
    Yellow,
    /// Blue background.
    Blue,
    /// Magenta background.
    Magenta,
    /// Cyan background.
    Cyan,
}

impl BgColor {
    /// SGR parameter selecting this colour.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Red => 41,
            Self::Green => 42,
            Self::Yellow => 43,
            Self::Blue => 44,
            Self::Magenta => 45,
            Self::Cyan => 46,
        }
    }
}

/// Colour selection applied to a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    text: Option<TextColor>,
    background: Option<BgColor>,
}

impl Style {
    /// Style without any colour.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            text: None,
            background: None,
        }
    }

    /// Style with the given foreground colour.
    #[must_use]
    pub const fn text(color: TextColor) -> Self {
        Self {
            text: Some(color),
            background: None,
        }
    }

    /// Style with the given background colour.
    #[must_use]
    pub const fn background(color: BgColor) -> Self {
        Self {
            text: None,
            background: Some(color),
        }
    }

    /// Adds a background colour to the style.
    #[must_use]
    pub const fn on(mut self, color: BgColor) -> Self {
        self.background = Some(color);
        self
    }

    fn codes(self) -> impl Iterator<Item = u8> {
        self.text
            .map(TextColor::code)
            .into_iter()
            .chain(self.background.map(BgColor::code))
    }
}

impl From<TextColor> for Style {
    fn from(color: TextColor) -> Self {
        Self::text(color)
    }
}

impl From<BgColor> for Style {
    fn from(color: BgColor) -> Self {
        Self::background(color)
    }
}

/// Wraps `text` in the ANSI escape sequence for `style`.
///
/// The sequence always starts with a reset, so `paint("hi", Style::plain())`
/// yields `"\x1b[0mhi\x1b[0m"`. The foreground code precedes the background
/// code.
#[must_use]
pub fn paint(text: &str, style: impl Into<Style>) -> String {
    let mut result = String::from("\x1b[0");
    for code in style.into().codes() {
        // Writing into a `String` cannot fail.
        let _ = write!(result, ";{code}");
    }
    result.push('m');
    result.push_str(text);
    result.push_str("\x1b[0m");
    result
}

/// Writes colourised text to an output sink.
///
/// The sink is held behind a `RefCell` so a single printer can be shared
/// through `Rc` between the router, the input reader and handlers.
pub struct Printer {
    writer: RefCell<Box<dyn Write>>,
    ansi: bool,
}

impl Printer {
    /// Printer writing to the process stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Printer writing to the given sink.
    #[must_use]
    pub fn with_writer(writer: impl Write + 'static) -> Self {
        Self {
            writer: RefCell::new(Box::new(writer)),
            ansi: true,
        }
    }

    /// Enables or disables ANSI escape sequences.
    ///
    /// When disabled, text is written verbatim and styles are ignored.
    #[must_use]
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Returns true when escape sequences are emitted.
    #[must_use]
    pub const fn ansi(&self) -> bool {
        self.ansi
    }

    /// Applies `style` to `text`, honouring the ANSI setting.
    #[must_use]
    pub fn colorize(&self, text: &str, style: impl Into<Style>) -> String {
        if self.ansi {
            paint(text, style)
        } else {
            text.to_owned()
        }
    }

    /// Prints `text` using `style`.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when the sink rejects the write.
    pub fn print(&self, text: &str, style: impl Into<Style>) -> io::Result<&Self> {
        let message = self.colorize(text, style);
        self.output(&message)?;
        Ok(self)
    }

    /// Prints `text` using `style`, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when the sink rejects the write.
    pub fn print_line(&self, text: &str, style: impl Into<Style>) -> io::Result<&Self> {
        self.print(text, style)?;
        self.output("\n")?;
        Ok(self)
    }

    fn output(&self, data: &str) -> io::Result<()> {
        let mut writer = self.writer.borrow_mut();
        writer.write_all(data.as_bytes())?;
        writer.flush()
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::stdout()
    }
}

impl std::fmt::Debug for Printer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Printer").field("ansi", &self.ansi).finish()
    }
}

/// In-memory sink whose clones share the same buffer.
///
/// Hand one clone to a [`Printer`] and keep another to inspect what was
/// written.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the written bytes decoded as UTF-8, replacing invalid data.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.bytes.borrow_mut().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    const TEXT: &str = "Hello, World!";

    #[fixture]
    fn captured() -> (Printer, SharedBuffer) {
        let buffer = SharedBuffer::new();
        (Printer::with_writer(buffer.clone()), buffer)
    }

    #[rstest]
    #[case::plain(Style::plain(), "\x1b[0mHello, World!\x1b[0m")]
    #[case::text(Style::text(TextColor::Red), "\x1b[0;31mHello, World!\x1b[0m")]
    #[case::background(Style::background(BgColor::Red), "\x1b[0;41mHello, World!\x1b[0m")]
    #[case::both(
        Style::text(TextColor::Green).on(BgColor::Red),
        "\x1b[0;32;41mHello, World!\x1b[0m"
    )]
    fn paints_escape_sequences(#[case] style: Style, #[case] expected: &str) {
        assert_eq!(paint(TEXT, style), expected);
    }

    #[rstest]
    #[case(TextColor::Red, 31)]
    #[case(TextColor::Green, 32)]
    #[case(TextColor::Yellow, 33)]
    #[case(TextColor::Blue, 34)]
    #[case(TextColor::Magenta, 35)]
    #[case(TextColor::Cyan, 36)]
    fn text_colour_codes(#[case] color: TextColor, #[case] code: u8) {
        assert_eq!(color.code(), code);
    }

    #[rstest]
    #[case(BgColor::Red, 41)]
    #[case(BgColor::Green, 42)]
    #[case(BgColor::Yellow, 43)]
    #[case(BgColor::Blue, 44)]
    #[case(BgColor::Magenta, 45)]
    #[case(BgColor::Cyan, 46)]
    fn background_colour_codes(#[case] color: BgColor, #[case] code: u8) {
        assert_eq!(color.code(), code);
    }

    #[rstest]
    fn prints_with_and_without_newline(captured: (Printer, SharedBuffer)) {
        let (printer, buffer) = captured;
        let style = Style::text(TextColor::Cyan).on(BgColor::Magenta);

        let returned = printer.print(TEXT, style).expect("print");
        assert!(std::ptr::eq(returned, &printer));
        printer.print_line(TEXT, style).expect("print line");

        assert_eq!(
            buffer.contents(),
            "\x1b[0;36;45mHello, World!\x1b[0m\x1b[0;36;45mHello, World!\x1b[0m\n"
        );
    }

    #[rstest]
    fn disabled_ansi_writes_plain_text(captured: (Printer, SharedBuffer)) {
        let (printer, buffer) = captured;
        let printer = printer.with_ansi(false);
        printer
            .print_line(TEXT, TextColor::Red)
            .expect("print line");
        assert_eq!(buffer.contents(), "Hello, World!\n");
    }
}
