//! Narsese surface syntax (C12): an external-collaborator convenience for
//! feeding the kernel from test fixtures and a driver's input channel, not
//! part of the kernel proper (section 1's parser Non-goal names the
//! *primary* interface, not this reading-in convenience). Reworked onto a
//! `pest` grammar from the teacher's hand-rolled recursive-descent parser.

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser as PestParser;

use crate::error::ParseError;
use crate::task::{Punctuation, Tense};
use crate::term::{Op, Term, Variable};
use crate::truth::TruthValue;

#[derive(PestParser)]
#[grammar = "parser/narsese.pest"]
struct NarseseParser;

/// A parsed sentence, tense already resolved against the caller's `now`.
#[derive(Debug, Clone)]
pub struct ParsedSentence {
    pub content: Term,
    pub truth: Option<TruthValue>,
    pub punctuation: Punctuation,
    pub tense: Tense,
}

/// Parses one Narsese sentence (`<bird --> flyer>. %1.0;0.9%` etc.).
/// `now` resolves a `:|:` present-tense marker into an absolute time.
pub fn parse_sentence(input: &str, now: i64) -> Result<ParsedSentence, ParseError> {
    let mut pairs = NarseseParser::parse(Rule::sentence, input.trim())
        .map_err(|e| ParseError::Grammar(e.to_string()))?;
    let sentence_pair = pairs.next().ok_or(ParseError::UnexpectedEndOfInput)?;

    let mut content = None;
    let mut truth = None;
    let mut punctuation = None;
    let mut tense = Tense::Eternal;

    for pair in sentence_pair.into_inner() {
        match pair.as_rule() {
            Rule::term => content = Some(term_from_pair(pair)?),
            Rule::truth => truth = Some(truth_from_pair(pair)?),
            Rule::punctuation => punctuation = Some(punctuation_from_pair(&pair)?),
            Rule::tense => tense = tense_from_pair(pair, now)?,
            Rule::EOI => {}
            _ => {}
        }
    }

    let content = content.ok_or_else(|| ParseError::InvalidTerm("missing term".to_string()))?;
    let punctuation = punctuation.ok_or(ParseError::UnexpectedEndOfInput)?;
    if matches!(punctuation, Punctuation::Question | Punctuation::Quest) && truth.is_some() {
        return Err(ParseError::InvalidTruth(
            "questions and quests cannot carry a truth value".to_string(),
        ));
    }

    Ok(ParsedSentence { content, truth, punctuation, tense })
}

fn punctuation_from_pair(pair: &Pair<Rule>) -> Result<Punctuation, ParseError> {
    match pair.as_str() {
        "." => Ok(Punctuation::Judgment),
        "!" => Ok(Punctuation::Goal),
        "?" => Ok(Punctuation::Question),
        "@" => Ok(Punctuation::Quest),
        other => Err(ParseError::InvalidPunctuation(other.chars().next().unwrap_or('?'))),
    }
}

fn truth_from_pair(pair: Pair<Rule>) -> Result<TruthValue, ParseError> {
    let mut numbers = pair.into_inner().filter(|p| p.as_rule() == Rule::number);
    let frequency: f32 = numbers
        .next()
        .ok_or_else(|| ParseError::InvalidTruth("missing frequency".to_string()))?
        .as_str()
        .parse()
        .map_err(|_| ParseError::InvalidTruth("invalid frequency".to_string()))?;
    let confidence: f32 = numbers
        .next()
        .ok_or_else(|| ParseError::InvalidTruth("missing confidence".to_string()))?
        .as_str()
        .parse()
        .map_err(|_| ParseError::InvalidTruth("invalid confidence".to_string()))?;
    Ok(TruthValue::new(frequency, confidence))
}

fn tense_from_pair(pair: Pair<Rule>, now: i64) -> Result<Tense, ParseError> {
    let inner = pair.into_inner().next();
    match inner {
        None => Ok(Tense::Eternal),
        Some(p) => match p.as_rule() {
            Rule::present_tense => Ok(Tense::At(now)),
            Rule::eternal_tense => Ok(Tense::Eternal),
            Rule::signed_time => {
                let text = p.as_str();
                let offset: i64 = text[1..text.len() - 1]
                    .parse()
                    .map_err(|_| ParseError::InvalidTime(text.to_string()))?;
                Ok(Tense::At(now + offset))
            }
            _ => Ok(Tense::Eternal),
        },
    }
}

fn term_from_pair(pair: Pair<Rule>) -> Result<Term, ParseError> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| ParseError::InvalidTerm("empty term".to_string()))?;
    match inner.as_rule() {
        Rule::statement => statement_from_pair(inner),
        Rule::compound => compound_from_pair(inner),
        Rule::set_ext => set_from_pair(inner, Op::SetExt),
        Rule::set_int => set_from_pair(inner, Op::SetInt),
        Rule::variable => variable_from_pair(&inner),
        Rule::placeholder => Err(ParseError::InvalidTerm(
            "image placeholder '_' may only appear inside a (/ ...) or (\\ ...) compound".to_string(),
        )),
        Rule::atom => Ok(Term::atom(inner.as_str())),
        other => Err(ParseError::InvalidTerm(format!("unexpected term rule {:?}", other))),
    }
}

fn variable_from_pair(pair: &Pair<Rule>) -> Result<Term, ParseError> {
    let text = pair.as_str();
    let mut chars = text.chars();
    let prefix = chars.next().ok_or_else(|| ParseError::InvalidTerm("empty variable".to_string()))?;
    let name: String = chars.collect();
    let variable = match prefix {
        '#' => Variable::new_dep(&name),
        '$' => Variable::new_indep(&name),
        '?' => Variable::new_query(&name),
        '%' => Variable::new_pattern(&name),
        other => return Err(ParseError::InvalidTerm(format!("unknown variable prefix '{}'", other))),
    };
    Ok(Term::Variable(variable))
}

fn statement_from_pair(pair: Pair<Rule>) -> Result<Term, ParseError> {
    let mut subject = None;
    let mut copula = None;
    let mut predicate = None;
    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::term if subject.is_none() => subject = Some(term_from_pair(p)?),
            Rule::term => predicate = Some(term_from_pair(p)?),
            Rule::copula => copula = Some(p.as_str().to_string()),
            _ => {}
        }
    }
    let subject = subject.ok_or_else(|| ParseError::InvalidTerm("statement missing subject".to_string()))?;
    let predicate = predicate.ok_or_else(|| ParseError::InvalidTerm("statement missing predicate".to_string()))?;
    let op = match copula.as_deref() {
        Some("-->") => Op::Inheritance,
        Some("<->") => Op::Similarity,
        Some("==>") => Op::Implication,
        Some("<=>") => Op::Equivalence,
        Some(other) => return Err(ParseError::InvalidTerm(format!("unknown copula '{}'", other))),
        None => return Err(ParseError::InvalidTerm("statement missing copula".to_string())),
    };
    Term::statement(op, subject, predicate)
        .ok_or_else(|| ParseError::InvalidTerm("degenerate statement".to_string()))
}

fn op_from_prefix(text: &str) -> Result<Op, ParseError> {
    match text {
        "&&" => Ok(Op::Conjunction),
        "||" => Ok(Op::Disjunction),
        "--" => Ok(Op::Negation),
        "&" => Ok(Op::IntersectionExt),
        "|" => Ok(Op::IntersectionInt),
        "-" => Ok(Op::DifferenceExt),
        "~" => Ok(Op::DifferenceInt),
        "*" => Ok(Op::Product),
        "/" => Ok(Op::ImageExt),
        "\\" => Ok(Op::ImageInt),
        other => Err(ParseError::InvalidTerm(format!("unknown operator '{}'", other))),
    }
}

fn compound_from_pair(pair: Pair<Rule>) -> Result<Term, ParseError> {
    let mut inner = pair.into_inner();
    let op_pair = inner.next().ok_or_else(|| ParseError::InvalidTerm("compound missing operator".to_string()))?;
    let op = op_from_prefix(op_pair.as_str())?;

    if op.is_image() {
        return image_from_pairs(op, inner);
    }

    let mut subterms = Vec::new();
    for p in inner {
        if p.as_rule() == Rule::term {
            subterms.push(term_from_pair(p)?);
        }
    }
    Term::compound(op, subterms).ok_or_else(|| ParseError::InvalidTerm("degenerate compound".to_string()))
}

/// `(/ relation ... _ ...)`: the placeholder's position among the
/// arguments fixes the image index; the stored subterms drop it entirely.
fn image_from_pairs(op: Op, pairs: pest::iterators::Pairs<Rule>) -> Result<Term, ParseError> {
    let mut relation = None;
    let mut args = Vec::new();
    let mut placeholder_pos = None;

    for p in pairs {
        if p.as_rule() != Rule::term {
            continue;
        }
        let is_placeholder = p
            .clone()
            .into_inner()
            .next()
            .map(|inner| inner.as_rule() == Rule::placeholder)
            .unwrap_or(false);
        if relation.is_none() {
            relation = Some(term_from_pair(p)?);
            continue;
        }
        if is_placeholder {
            placeholder_pos = Some(args.len());
            continue;
        }
        args.push(term_from_pair(p)?);
    }

    let relation = relation.ok_or_else(|| ParseError::InvalidTerm("image missing relation".to_string()))?;
    let index = placeholder_pos
        .ok_or_else(|| ParseError::InvalidTerm("image missing '_' placeholder".to_string()))?;
    let mut subterms = Vec::with_capacity(1 + args.len());
    subterms.push(relation);
    subterms.extend(args);
    Term::image(op, subterms, index + 1).ok_or_else(|| ParseError::InvalidTerm("degenerate image".to_string()))
}

fn set_from_pair(pair: Pair<Rule>, op: Op) -> Result<Term, ParseError> {
    let mut subterms = Vec::new();
    for p in pair.into_inner() {
        if p.as_rule() == Rule::term {
            subterms.push(term_from_pair(p)?);
        }
    }
    Term::compound(op, subterms).ok_or_else(|| ParseError::InvalidTerm("degenerate set".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_atomic_judgment_with_truth() {
        let parsed = parse_sentence("cat %0.9;0.8%.", 0).unwrap();
        assert_eq!(parsed.content, Term::atom("cat"));
        assert_eq!(parsed.punctuation, Punctuation::Judgment);
        let truth = parsed.truth.unwrap();
        assert!((truth.frequency() - 0.9).abs() < 1e-6);
        assert!((truth.confidence() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn parses_inheritance_statement() {
        let parsed = parse_sentence("(bird --> flyer).", 0).unwrap();
        assert_eq!(format!("{}", parsed.content), "(bird --> flyer)");
    }

    #[test]
    fn parses_conjunction_compound() {
        let parsed = parse_sentence("(&&, cat, dog)!", 0).unwrap();
        assert_eq!(parsed.punctuation, Punctuation::Goal);
        assert_eq!(format!("{}", parsed.content), "(cat && dog)");
    }

    #[test]
    fn question_rejects_truth() {
        let result = parse_sentence("cat %0.9;0.8%?", 0);
        assert!(result.is_err());
    }

    #[test]
    fn parses_image_with_placeholder() {
        let parsed = parse_sentence("(tom --> (/, uncle, _, mary)).", 0).unwrap();
        assert_eq!(format!("{}", parsed.content), "(tom --> (/, uncle, _, mary))");
    }

    #[test]
    fn parses_present_tense() {
        let parsed = parse_sentence("event. :|:", 7).unwrap();
        assert_eq!(parsed.tense, Tense::At(7));
    }

    #[test]
    fn parses_variable() {
        let parsed = parse_sentence("#x?", 0).unwrap();
        assert_eq!(format!("{}", parsed.content), "#x");
    }
}
