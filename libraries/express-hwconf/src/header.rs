//! C header form of a board profile
//!
//! The ESP-IDF build still consumes one `hw_<board>.h` per board. This module
//! reads the `#define`s out of such a header and turns them back into a
//! [`BoardProfile`], and renders a profile as a header.

use crate::chip::Chip;
use crate::error::HwconfError;
use crate::profile::{BoardProfile, CanPins, PinRole, UartConfig};
use std::collections::HashMap;
use std::fmt::Write as _;
use thiserror::Error;

/// Board name macro
pub const HW_NAME: &str = "HW_NAME";
/// Target chip macro
pub const HW_TARGET: &str = "HW_TARGET";
/// UART communication flag
pub const HW_UART_COMM: &str = "HW_UART_COMM";
/// Init hook macro
pub const HW_INIT_HOOK: &str = "HW_INIT_HOOK";
/// UART peripheral index macro
pub const UART_NUM: &str = "UART_NUM";
/// UART baud rate macro
pub const UART_BAUDRATE: &str = "UART_BAUDRATE";

/// Failure turning a header into a board profile
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    /// A required macro is not defined
    #[error("{0} is not defined")]
    MissingDefine(&'static str),

    /// A macro has a value of the wrong kind or out of range
    #[error("{name} has invalid value `{value}`")]
    InvalidValue { name: &'static str, value: String },

    /// `HW_TARGET` names a chip we do not support
    #[error("unknown target `{0}`")]
    UnknownTarget(String),

    /// Only part of a CAN or UART block is defined
    #[error("{block} block is incomplete: {missing} is not defined")]
    IncompleteBlock {
        block: &'static str,
        missing: &'static str,
    },

    /// The pins do not fit the target chip
    #[error(transparent)]
    Invalid(#[from] HwconfError),
}

/// Value of a `#define`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefineValue {
    /// Flag macro with no body
    Empty,
    /// C string literal, unescaped
    Str(String),
    /// Decimal or hex integer literal
    Int(i64),
    /// Anything else, verbatim
    Raw(String),
}

impl DefineValue {
    fn classify(body: &str) -> Self {
        let body = body.trim();
        if body.is_empty() {
            return DefineValue::Empty;
        }
        if let Some(inner) = body
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
        {
            return DefineValue::Str(unescape(inner));
        }
        match parse_int(body) {
            Some(n) => DefineValue::Int(n),
            None => DefineValue::Raw(body.to_string()),
        }
    }

    fn describe(&self) -> String {
        match self {
            DefineValue::Empty => String::new(),
            DefineValue::Str(s) => format!("\"{s}\""),
            DefineValue::Int(n) => n.to_string(),
            DefineValue::Raw(s) => s.clone(),
        }
    }
}

/// One `#define` directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Define {
    /// Parameter names for function-like macros
    pub params: Option<Vec<String>>,
    /// Macro body
    pub value: DefineValue,
}

/// All `#define`s of a header, by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defines {
    entries: HashMap<String, Define>,
}

impl Defines {
    /// Look up a macro
    pub fn get(&self, name: &str) -> Option<&Define> {
        self.entries.get(name)
    }

    /// Whether `name` is defined at all
    pub fn is_defined(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// String literal value of an object-like macro
    pub fn string(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(Define {
                params: None,
                value: DefineValue::Str(s),
            }) => Some(s),
            _ => None,
        }
    }

    /// Integer value of an object-like macro
    pub fn int(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(Define {
                params: None,
                value: DefineValue::Int(n),
            }) => Some(*n),
            _ => None,
        }
    }

    /// Number of macros
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no macro was found
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn field<T: TryFrom<i64>>(&self, name: &'static str) -> Result<Option<T>, HeaderError> {
        let Some(define) = self.get(name) else {
            return Ok(None);
        };
        let invalid = || HeaderError::InvalidValue {
            name,
            value: define.value.describe(),
        };
        match (&define.params, &define.value) {
            (None, DefineValue::Int(n)) => T::try_from(*n).map(Some).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }

    /// Build the board profile this header describes
    ///
    /// `HW_NAME` and `HW_TARGET` are required. The CAN and UART blocks are
    /// optional but must be complete when present. The result is validated
    /// against the target chip.
    pub fn board_profile(&self) -> Result<BoardProfile<'_>, HeaderError> {
        let name = self.required_string(HW_NAME)?;
        let target = self.required_string(HW_TARGET)?;
        let target: Chip = target
            .parse()
            .map_err(|_| HeaderError::UnknownTarget(target.to_string()))?;

        let can_tx = self.field::<u8>(PinRole::CanTx.define_name())?;
        let can_rx = self.field::<u8>(PinRole::CanRx.define_name())?;
        let can = match (can_tx, can_rx) {
            (Some(tx), Some(rx)) => Some(CanPins { tx, rx }),
            (None, None) => None,
            (Some(_), None) => return Err(incomplete("CAN", PinRole::CanRx.define_name())),
            (None, Some(_)) => return Err(incomplete("CAN", PinRole::CanTx.define_name())),
        };

        let port = self.field::<u8>(UART_NUM)?;
        let baud_rate = self.field::<u32>(UART_BAUDRATE)?;
        let tx = self.field::<u8>(PinRole::UartTx.define_name())?;
        let rx = self.field::<u8>(PinRole::UartRx.define_name())?;
        let uart = match (port, baud_rate, tx, rx) {
            (Some(port), Some(baud_rate), Some(tx), Some(rx)) => Some(UartConfig {
                port,
                baud_rate,
                tx,
                rx,
            }),
            (None, None, None, None) => None,
            (port, baud_rate, tx, _) => {
                let missing = if port.is_none() {
                    UART_NUM
                } else if baud_rate.is_none() {
                    UART_BAUDRATE
                } else if tx.is_none() {
                    PinRole::UartTx.define_name()
                } else {
                    PinRole::UartRx.define_name()
                };
                return Err(incomplete("UART", missing));
            }
        };

        let profile = BoardProfile {
            name,
            target,
            uart_comm: self.is_defined(HW_UART_COMM),
            can,
            uart,
        };
        profile.validate()?;
        Ok(profile)
    }

    fn required_string(&self, name: &'static str) -> Result<&str, HeaderError> {
        match self.get(name) {
            None => Err(HeaderError::MissingDefine(name)),
            Some(_) => self.string(name).ok_or_else(|| HeaderError::InvalidValue {
                name,
                value: self.entries[name].value.describe(),
            }),
        }
    }
}

fn incomplete(block: &'static str, missing: &'static str) -> HeaderError {
    HeaderError::IncompleteBlock { block, missing }
}

/// Collect the `#define` directives of a C header
///
/// Backslash line continuations are joined first, then comments dropped, as
/// a C preprocessor does. Everything that is not a `#define` is ignored.
pub fn parse_defines(text: &str) -> Defines {
    let joined = text.replace("\\\r\n", " ").replace("\\\n", " ");
    let text = strip_comments(&joined);
    let mut defines = Defines::default();

    for line in text.lines() {
        let Some(directive) = line.trim_start().strip_prefix('#') else {
            continue;
        };
        let Some(rest) = directive.trim_start().strip_prefix("define") else {
            continue;
        };
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }
        let rest = rest.trim_start();

        let name_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if name_len == 0 {
            continue;
        }
        let (name, rest) = rest.split_at(name_len);

        // Function-like only when the parenthesis directly follows the name
        let (params, body) = match rest.strip_prefix('(') {
            Some(after) => match after.split_once(')') {
                Some((params, body)) => (
                    Some(
                        params
                            .split(',')
                            .map(str::trim)
                            .filter(|p| !p.is_empty())
                            .map(str::to_string)
                            .collect(),
                    ),
                    body,
                ),
                None => continue,
            },
            None => (None, rest),
        };

        defines.entries.insert(
            name.to_string(),
            Define {
                params,
                value: DefineValue::classify(body),
            },
        );
    }

    defines
}

/// Replace `//` and `/* */` comments with whitespace, leaving string and
/// character literals alone
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' => {
                out.push(c);
                while let Some(inner) = chars.next() {
                    out.push(inner);
                    if inner == '\\' {
                        if let Some(escaped) = chars.next() {
                            out.push(escaped);
                        }
                    } else if inner == c || inner == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                for inner in chars.by_ref() {
                    if inner == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                out.push(' ');
                let mut prev = '\0';
                for inner in chars.by_ref() {
                    if prev == '*' && inner == '/' {
                        break;
                    }
                    // Keep line structure so directives stay on their own line
                    if inner == '\n' {
                        out.push('\n');
                    }
                    prev = inner;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

fn parse_int(body: &str) -> Option<i64> {
    let (negative, digits) = match body.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, body),
    };
    let digits = digits.trim_end_matches(['u', 'U', 'l', 'L']);
    let value = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        i64::from_str_radix(hex, 16).ok()?
    } else if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse().ok()?
    } else {
        return None;
    };
    Some(if negative { -value } else { value })
}

/// Include guard used for a board's header
pub fn include_guard(profile: &BoardProfile<'_>) -> String {
    format!("HW_{}_H_", profile.slug().replace('-', "_").to_uppercase())
}

/// File name of a board's header (`hw_devkit_s3.h`)
pub fn header_file_name(profile: &BoardProfile<'_>) -> String {
    format!("hw_{}.h", profile.slug().replace('-', "_"))
}

/// Render a board profile as a hwconf header
pub fn render_header(profile: &BoardProfile<'_>) -> String {
    fn define(out: &mut String, name: &str, value: impl std::fmt::Display) {
        let _ = writeln!(out, "#define {name:<24}{value}");
    }

    let guard = include_guard(profile);
    let mut out = String::new();
    let _ = writeln!(out, "#ifndef {guard}");
    let _ = writeln!(out, "#define {guard}");
    out.push('\n');

    define(&mut out, HW_NAME, format_args!("\"{}\"", escape(profile.name)));
    define(&mut out, HW_TARGET, format_args!("\"{}\"", profile.target));
    if profile.uart_comm {
        let _ = writeln!(out, "#define {HW_UART_COMM}");
    }
    out.push('\n');
    define(&mut out, "HW_INIT_HOOK()", "hw_init()");

    if let Some(can) = profile.can {
        out.push_str("\n// CAN\n");
        define(&mut out, PinRole::CanTx.define_name(), can.tx);
        define(&mut out, PinRole::CanRx.define_name(), can.rx);
    }

    if let Some(uart) = profile.uart {
        out.push_str("\n// UART\n");
        define(&mut out, UART_NUM, uart.port);
        define(&mut out, UART_BAUDRATE, uart.baud_rate);
        define(&mut out, PinRole::UartTx.define_name(), uart.tx);
        define(&mut out, PinRole::UartRx.define_name(), uart.rx);
    }

    out.push_str("\n// Functions\nvoid hw_init(void);\n\n");
    let _ = writeln!(out, "#endif /* {guard} */");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boards::{DEVKIT_C6, DEVKIT_S3};

    #[test]
    fn test_value_kinds() {
        let defines = parse_defines(
            "#define A \"text\"\n#define B 0x1F\n#define C\n#define D (1 << 3)\n#define E -4\n",
        );
        assert_eq!(defines.string("A"), Some("text"));
        assert_eq!(defines.int("B"), Some(31));
        assert_eq!(defines.get("C").unwrap().value, DefineValue::Empty);
        assert_eq!(
            defines.get("D").unwrap().value,
            DefineValue::Raw("(1 << 3)".into())
        );
        assert_eq!(defines.int("E"), Some(-4));
        assert_eq!(defines.len(), 5);
    }

    #[test]
    fn test_function_like() {
        let defines = parse_defines("#define HW_INIT_HOOK()\t\thw_init()\n#define MAX(a, b) ((a) > (b) ? (a) : (b))");
        let hook = defines.get(HW_INIT_HOOK).unwrap();
        assert_eq!(hook.params, Some(vec![]));
        assert_eq!(hook.value, DefineValue::Raw("hw_init()".into()));
        assert_eq!(
            defines.get("MAX").unwrap().params,
            Some(vec!["a".to_string(), "b".to_string()])
        );
        // A function-like macro is not an object-like value
        assert_eq!(defines.string(HW_INIT_HOOK), None);
    }

    #[test]
    fn test_space_before_paren_is_object_like() {
        let defines = parse_defines("#define X (2)");
        assert_eq!(defines.get("X").unwrap().params, None);
    }

    #[test]
    fn test_comments_removed() {
        let text = "/* #define HIDDEN 1 */\n#define A 4 // trailing\n#define B /* inline */ 5\n/*\n#define C 6\n*/\n#define D \"a // b\"\n";
        let defines = parse_defines(text);
        assert!(!defines.is_defined("HIDDEN"));
        assert!(!defines.is_defined("C"));
        assert_eq!(defines.int("A"), Some(4));
        assert_eq!(defines.int("B"), Some(5));
        assert_eq!(defines.string("D"), Some("a // b"));
    }

    #[test]
    fn test_continuation_and_override() {
        let defines = parse_defines("#define A \\\n  7\n#define A 8\n# define B 1\n#include \"x.h\"\n#defineC 2\n");
        assert_eq!(defines.int("A"), Some(8));
        assert_eq!(defines.int("B"), Some(1));
        assert!(!defines.is_defined("C"));
        assert!(!defines.is_defined("defineC"));
    }

    #[test]
    fn test_continued_line_comment_swallows_next_line() {
        let defines = parse_defines("// note \\\n#define X 1\n#define Y 2 /* a \\\n b */\n");
        assert!(!defines.is_defined("X"));
        assert_eq!(defines.int("Y"), Some(2));
    }

    #[test]
    fn test_signed_hex_is_not_int() {
        let defines = parse_defines("#define A 0x+5\n#define B 0x-5\n#define C 0x\n#define D -0x10\n");
        assert_eq!(defines.int("A"), None);
        assert_eq!(defines.int("B"), None);
        assert_eq!(defines.int("C"), None);
        assert_eq!(defines.int("D"), Some(-16));
        assert_eq!(defines.get("A").unwrap().value, DefineValue::Raw("0x+5".into()));
    }

    #[test]
    fn test_escaped_string() {
        let defines = parse_defines(r#"#define HW_NAME "Board \"X\" \\ 1""#);
        assert_eq!(defines.string(HW_NAME), Some(r#"Board "X" \ 1"#));
    }

    #[test]
    fn test_missing_name() {
        let defines = parse_defines("#define HW_TARGET \"esp32c6\"\n");
        assert_eq!(
            defines.board_profile(),
            Err(HeaderError::MissingDefine(HW_NAME))
        );
    }

    #[test]
    fn test_name_must_be_string() {
        let defines = parse_defines("#define HW_NAME 5\n#define HW_TARGET \"esp32c6\"\n");
        assert_eq!(
            defines.board_profile(),
            Err(HeaderError::InvalidValue {
                name: HW_NAME,
                value: "5".into(),
            })
        );
    }

    #[test]
    fn test_unknown_target() {
        let defines = parse_defines("#define HW_NAME \"X\"\n#define HW_TARGET \"esp32c3\"\n");
        assert_eq!(
            defines.board_profile(),
            Err(HeaderError::UnknownTarget("esp32c3".into()))
        );
    }

    #[test]
    fn test_incomplete_can_block() {
        let defines = parse_defines(
            "#define HW_NAME \"X\"\n#define HW_TARGET \"esp32c6\"\n#define CAN_TX_GPIO_NUM 4\n",
        );
        assert_eq!(
            defines.board_profile(),
            Err(HeaderError::IncompleteBlock {
                block: "CAN",
                missing: "CAN_RX_GPIO_NUM",
            })
        );
    }

    #[test]
    fn test_incomplete_uart_block() {
        let defines = parse_defines(
            "#define HW_NAME \"X\"\n#define HW_TARGET \"esp32c6\"\n#define UART_NUM 0\n#define UART_TX 16\n#define UART_RX 17\n",
        );
        assert_eq!(
            defines.board_profile(),
            Err(HeaderError::IncompleteBlock {
                block: "UART",
                missing: UART_BAUDRATE,
            })
        );
    }

    #[test]
    fn test_pin_out_of_range() {
        let defines = parse_defines(
            "#define HW_NAME \"X\"\n#define HW_TARGET \"esp32c6\"\n#define CAN_TX_GPIO_NUM 300\n#define CAN_RX_GPIO_NUM 5\n",
        );
        assert_eq!(
            defines.board_profile(),
            Err(HeaderError::InvalidValue {
                name: "CAN_TX_GPIO_NUM",
                value: "300".into(),
            })
        );
    }

    #[test]
    fn test_invalid_pins_rejected() {
        let defines = parse_defines(
            "#define HW_NAME \"X\"\n#define HW_TARGET \"esp32s3\"\n#define CAN_TX_GPIO_NUM 22\n#define CAN_RX_GPIO_NUM 5\n",
        );
        assert!(matches!(
            defines.board_profile(),
            Err(HeaderError::Invalid(HwconfError::InvalidGpio { pin: 22, .. }))
        ));
    }

    #[test]
    fn test_minimal_profile() {
        let defines = parse_defines("#define HW_NAME \"Bare\"\n#define HW_TARGET \"esp32s3\"\n");
        let profile = defines.board_profile().unwrap();
        assert_eq!(profile.name, "Bare");
        assert_eq!(profile.target, Chip::Esp32S3);
        assert!(!profile.uart_comm);
        assert_eq!(profile.can, None);
        assert_eq!(profile.uart, None);
    }

    #[test]
    fn test_render_devkit_s3() {
        let text = render_header(&DEVKIT_S3);
        assert!(text.starts_with("#ifndef HW_DEVKIT_S3_H_\n#define HW_DEVKIT_S3_H_\n"));
        assert!(text.contains("#define HW_NAME                 \"DevKit S3\"\n"));
        assert!(text.contains("#define HW_UART_COMM\n"));
        assert!(text.contains("#define HW_INIT_HOOK()          hw_init()\n"));
        assert!(text.contains("// CAN\n#define CAN_TX_GPIO_NUM         16\n"));
        assert!(text.contains("#define UART_TX                 43\n"));
        assert!(text.contains("void hw_init(void);"));
        assert!(text.ends_with("#endif /* HW_DEVKIT_S3_H_ */\n"));
    }

    #[test]
    fn test_render_then_parse() {
        for board in [DEVKIT_C6, DEVKIT_S3] {
            let text = render_header(&board);
            let defines = parse_defines(&text);
            assert_eq!(defines.board_profile().unwrap(), board);
        }
    }

    #[test]
    fn test_render_without_can() {
        let board = BoardProfile {
            can: None,
            ..DEVKIT_S3
        };
        let text = render_header(&board);
        assert!(!text.contains("// CAN"));
        let defines = parse_defines(&text);
        assert_eq!(defines.board_profile().unwrap(), board);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(header_file_name(&DEVKIT_C6), "hw_devkit_c6.h");
        assert_eq!(include_guard(&DEVKIT_C6), "HW_DEVKIT_C6_H_");
    }
}
