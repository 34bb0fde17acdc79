//! # `id_to_token` Vocabulary Files

use std::{
    borrow::Cow,
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    errors::{WTError, WTResult},
    types::{CountType, TokenType},
    vocab::TokenRegistry,
};

/// The first line of every vocabulary file.
pub const VOCAB_HEADER: &str = "id_to_token:";

/// What to do with a line which matches neither the id nor the entry grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedLinePolicy {
    /// Fail the load with [`WTError::Parse`].
    #[default]
    Reject,

    /// Log a warning and continue.
    ///
    /// Structural errors (out-of-sequence ids, an id without an entry,
    /// an entry without an id, duplicate tokens, a missing header)
    /// still fail the load.
    Skip,
}

/// Options for loading vocabulary files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Handling of malformed lines.
    pub malformed_lines: MalformedLinePolicy,
}

impl LoadOptions {
    /// Set the [`MalformedLinePolicy`].
    pub fn with_malformed_lines(
        mut self,
        policy: MalformedLinePolicy,
    ) -> Self {
        self.malformed_lines = policy;
        self
    }
}

/// Write a registry in vocabulary file format.
///
/// Tokens are quoted; `\`, `"`, and the `\n`, `\r`, `\t` control characters are
/// backslash-escaped so that every token survives a round-trip.
///
/// ## Arguments
/// * `registry` - the registry to write.
/// * `writer` - the target writer.
pub fn save_registry_to_writer<T: TokenType, W: Write>(
    registry: &TokenRegistry<T>,
    writer: &mut W,
) -> std::io::Result<()> {
    writeln!(writer, "{VOCAB_HEADER}")?;
    for (id, token, count) in registry.iter() {
        writeln!(writer, "{id} :")?;
        writeln!(writer, "   \"{}\" : {count}", escape_token(token))?;
    }
    Ok(())
}

/// Save a registry to a vocabulary file, overwriting any existing file.
///
/// ## Arguments
/// * `registry` - the registry to save.
/// * `path` - the destination path; the parent directory must exist.
///
/// ## Errors
/// * [`WTError::Io`] - the file could not be opened or written.
pub fn save_registry_path<T: TokenType, P: AsRef<Path>>(
    registry: &TokenRegistry<T>,
    path: P,
) -> WTResult<()> {
    let path = path.as_ref();

    let file = File::create(path)
        .map_err(|e| WTError::io(format!("failed to open {path:?} for writing"), e))?;
    let mut writer = BufWriter::new(file);

    save_registry_to_writer(registry, &mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| WTError::io(format!("failed to write {path:?}"), e))?;

    log::info!("saved {} tokens to {}", registry.len(), path.display());
    Ok(())
}

/// Load a vocabulary from a reader into an empty registry.
///
/// Entries are registered through [`TokenRegistry::add_token`] in file order,
/// so ids follow the file; the parsed frequency then replaces the initial count.
///
/// The registry is only modified if the whole load succeeds.
///
/// Files written by [`save_registry_to_writer`] always round-trip. Older files
/// which wrote tokens without escaping load verbatim, except where a raw token
/// happens to contain one of the escape sequences `\\`, `\"`, `\n`, `\r`, `\t`;
/// those are decoded, so a raw `C:\new` loads with a newline.
///
/// ## Errors
/// * [`WTError::PreconditionViolation`] - `registry` is not empty.
/// * [`WTError::Io`] - the reader failed.
/// * [`WTError::Parse`] - a line could not be parsed; see [`LoadOptions`].
/// * [`WTError::EmptyVocabulary`] - no entries were found.
/// * [`WTError::CapacityExceeded`] - the file holds more tokens than `T` can index.
/// * [`WTError::Invariant`] - the loaded registry failed validation.
pub fn load_registry_from_reader<T: TokenType, R: BufRead>(
    registry: &mut TokenRegistry<T>,
    reader: R,
    options: LoadOptions,
) -> WTResult<()> {
    ensure_empty(registry)?;
    load_named(registry, reader, options, "<reader>")
}

/// Load a vocabulary file into an empty registry.
///
/// See [`load_registry_from_reader`].
pub fn load_registry_path<T: TokenType, P: AsRef<Path>>(
    registry: &mut TokenRegistry<T>,
    path: P,
    options: LoadOptions,
) -> WTResult<()> {
    let path = path.as_ref();
    ensure_empty(registry)?;

    let file = File::open(path)
        .map_err(|e| WTError::io(format!("failed to open {path:?} for reading"), e))?;

    load_named(
        registry,
        BufReader::new(file),
        options,
        &path.display().to_string(),
    )
}

/// Read a vocabulary file into a new registry.
///
/// See [`load_registry_from_reader`].
pub fn read_registry_path<T: TokenType, P: AsRef<Path>>(
    path: P,
    options: LoadOptions,
) -> WTResult<TokenRegistry<T>> {
    let mut registry = TokenRegistry::new();
    load_registry_path(&mut registry, path, options)?;
    Ok(registry)
}

fn ensure_empty<T: TokenType>(registry: &TokenRegistry<T>) -> WTResult<()> {
    if registry.is_empty() {
        Ok(())
    } else {
        Err(WTError::PreconditionViolation(format!(
            "cannot load into a registry which already holds {} tokens",
            registry.len()
        )))
    }
}

fn load_named<T: TokenType, R: BufRead>(
    registry: &mut TokenRegistry<T>,
    reader: R,
    options: LoadOptions,
    source: &str,
) -> WTResult<()> {
    let loaded: TokenRegistry<T> = parse_registry(reader, options, source)?;
    loaded.validate()?;

    match loaded.total_frequency() {
        Some(total) => log::info!(
            "loaded {} tokens ({total} occurrences) from {source}",
            loaded.len()
        ),
        None => log::info!(
            "loaded {} tokens (occurrence total exceeds {}) from {source}",
            loaded.len(),
            CountType::MAX
        ),
    }
    if let (Some(first), Some(last)) = (
        loaded.lookup_id(0),
        loaded.lookup_id(loaded.len().saturating_sub(1)),
    ) {
        log::info!("first token: {first:?}, last token: {last:?}");
    }

    *registry = loaded;
    Ok(())
}

#[derive(Debug, PartialEq)]
enum VocabLine {
    Id(u64),
    Entry { token: String, count: CountType },
}

fn parse_registry<T: TokenType, R: BufRead>(
    reader: R,
    options: LoadOptions,
    source: &str,
) -> WTResult<TokenRegistry<T>> {
    let mut registry = TokenRegistry::new();
    let mut seen_header = false;

    // (id, line number) of an id line still waiting for its entry.
    let mut pending_id: Option<(u64, usize)> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| WTError::io(format!("failed to read {source}"), e))?;

        if line.trim().is_empty() {
            continue;
        }

        if !seen_header {
            if line.trim_end() != VOCAB_HEADER {
                return Err(WTError::parse(
                    line_no,
                    format!("expected header {VOCAB_HEADER:?}"),
                ));
            }
            seen_header = true;
            continue;
        }

        let parsed = match parse_line(&line) {
            Ok(parsed) => parsed,
            Err(message) => match options.malformed_lines {
                MalformedLinePolicy::Reject => return Err(WTError::parse(line_no, message)),
                MalformedLinePolicy::Skip => {
                    log::warn!("{source}:{line_no}: skipping malformed line: {message}");
                    continue;
                }
            },
        };

        match parsed {
            VocabLine::Id(id) => {
                if let Some((pending, pending_line)) = pending_id {
                    return Err(WTError::parse(
                        pending_line,
                        format!("id {pending} has no token entry"),
                    ));
                }
                let expected = registry.len() as u64;
                if id != expected {
                    return Err(WTError::parse(
                        line_no,
                        format!("expected id {expected}, found {id}"),
                    ));
                }
                pending_id = Some((id, line_no));
            }
            VocabLine::Entry { token, count } => {
                if pending_id.take().is_none() {
                    return Err(WTError::parse(
                        line_no,
                        format!("token {token:?} has no id line"),
                    ));
                }
                if registry.contains_token(&token) {
                    return Err(WTError::parse(
                        line_no,
                        format!("duplicate token {token:?}"),
                    ));
                }
                registry.add_token(&token)?;
                registry.set_frequency(&token, count)?;
            }
        }
    }

    if let Some((pending, pending_line)) = pending_id {
        return Err(WTError::parse(
            pending_line,
            format!("id {pending} has no token entry"),
        ));
    }

    if registry.is_empty() {
        return Err(WTError::EmptyVocabulary(format!(
            "no tokens found in {source}"
        )));
    }

    log::debug!("parsed {} entries from {source}", registry.len());
    Ok(registry)
}

fn parse_line(line: &str) -> Result<VocabLine, String> {
    let trimmed = line.trim();
    if trimmed.starts_with('"') {
        parse_entry_line(trimmed)
    } else if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        parse_id_line(trimmed)
    } else {
        Err(format!("unrecognized line {trimmed:?}"))
    }
}

/// `<id> :`
fn parse_id_line(trimmed: &str) -> Result<VocabLine, String> {
    let (head, tail) = trimmed
        .split_once(':')
        .ok_or_else(|| format!("id line {trimmed:?} is missing ':'"))?;

    if !tail.trim().is_empty() {
        return Err(format!("unexpected text after id: {:?}", tail.trim()));
    }

    let head = head.trim();
    head.parse::<u64>()
        .map(VocabLine::Id)
        .map_err(|e| format!("invalid id {head:?}: {e}"))
}

/// `"<token>" : <frequency>`
///
/// Splits on the last `:`, so tokens may contain colons.
fn parse_entry_line(trimmed: &str) -> Result<VocabLine, String> {
    let (quoted, count) = trimmed
        .rsplit_once(':')
        .ok_or_else(|| format!("entry line {trimmed:?} is missing ':'"))?;

    let quoted = quoted.trim_end();
    let inner = quoted
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| format!("token {quoted:?} is not quoted"))?;

    let token = unescape_token(inner);
    if token.is_empty() {
        return Err("empty token".to_string());
    }

    let count = count.trim();
    let count = count
        .parse::<CountType>()
        .map_err(|e| format!("invalid frequency {count:?}: {e}"))?;
    if count == 0 {
        return Err(format!("frequency of {token:?} must be positive"));
    }

    Ok(VocabLine::Entry {
        token: token.into_owned(),
        count,
    })
}

fn escape_token(token: &str) -> Cow<'_, str> {
    if !token.contains(['\\', '"', '\n', '\r', '\t']) {
        return Cow::Borrowed(token);
    }

    let mut out = String::with_capacity(token.len() + 4);
    for c in token.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn unescape_token(inner: &str) -> Cow<'_, str> {
    if !inner.contains('\\') {
        return Cow::Borrowed(inner);
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            // Unknown escapes are kept verbatim.
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}
