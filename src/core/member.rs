//! Member (protein) identifier conventions.
//!
//! Members are named `<genome>.<contig>_<protein>`, for example
//! `ESCO.1216.00002.i0001_00001`: genome `ESCO.1216.00002`, contig tag `i0001`,
//! protein number `00001`. Identifiers that do not follow this shape are still
//! accepted; see [`genome_of`] for the fallbacks.

use std::cmp::Ordering;

/// Extract the genome name from a member identifier.
///
/// The genome is everything before the last `_`, minus the last `.`-separated
/// segment (the contig tag). Without a `_` the whole identifier is treated as the
/// genome-and-contig part, and without a `.` in that part it is the genome itself.
#[must_use]
pub fn genome_of(member: &str) -> &str {
    let genome_and_contig = member.rsplit_once('_').map_or(member, |(head, _)| head);
    genome_and_contig
        .rsplit_once('.')
        .map_or(genome_and_contig, |(genome, _)| genome)
}

/// One run of a natural-ordering key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Token {
    Number(u64),
    Text(String),
}

/// Split into digit / non-digit runs; digit runs too long for a u64 stay text.
fn natural_tokens(s: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_digits = false;

    for c in s.chars() {
        let is_digit = c.is_ascii_digit();
        if !current.is_empty() && is_digit != in_digits {
            tokens.push(make_token(std::mem::take(&mut current), in_digits));
        }
        in_digits = is_digit;
        current.push(c);
    }
    if !current.is_empty() {
        tokens.push(make_token(current, in_digits));
    }
    tokens
}

fn make_token(run: String, digits: bool) -> Token {
    if digits {
        if let Ok(n) = run.parse::<u64>() {
            return Token::Number(n);
        }
    }
    Token::Text(run)
}

/// Sort key grouping a family's members by genome, then by protein number.
///
/// Ordering compares the genome name with digit runs taken numerically, then the
/// numeric protein suffix, then the raw identifier so that distinct identifiers
/// never compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberKey {
    genome: Vec<Token>,
    protein: Option<u64>,
    raw: String,
}

impl MemberKey {
    #[must_use]
    pub fn new(member: &str) -> Self {
        let protein = member
            .rsplit_once('_')
            .and_then(|(_, num)| num.parse::<u64>().ok());
        Self {
            genome: natural_tokens(genome_of(member)),
            protein,
            raw: member.to_string(),
        }
    }
}

impl Ord for MemberKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.genome
            .cmp(&other.genome)
            .then_with(|| self.protein.cmp(&other.protein))
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for MemberKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort member identifiers in place by [`MemberKey`]
pub fn sort_members(members: &mut [String]) {
    members.sort_by_cached_key(|m| MemberKey::new(m));
}
