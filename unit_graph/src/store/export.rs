//! Textual export of a graph store.

use super::{GraphStore, Literal, NodeId, Object, Predicate, Statement};

/// Default namespace for exported identifiers.
pub const DEFAULT_BASE_URI: &str = "http://microrts.com/game/";

const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

impl GraphStore {
    /// Serialize all statements as N-Triples, one line per statement in
    /// emission order.
    ///
    /// Node identifiers are appended to `base_uri`. Predicates live in the
    /// namespace of their subject (`<base>unit/does`, `<base>action/doneBy`),
    /// except `type` and `label` which map to the RDF vocabulary.
    pub fn to_ntriples(&self, base_uri: &str) -> String {
        let mut out = String::new();
        for stmt in self.statements() {
            out.push_str(&ntriple(base_uri, stmt));
            out.push('\n');
        }
        out
    }

    /// Serialize the store as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn ntriple(base: &str, stmt: &Statement) -> String {
    let object = match &stmt.object {
        Object::Node(id) => node_uri(base, id),
        Object::Literal(lit) => literal_term(lit),
    };
    format!(
        "{} {} {} .",
        node_uri(base, &stmt.subject),
        predicate_uri(base, &stmt.subject, stmt.predicate),
        object
    )
}

fn node_uri(base: &str, id: &NodeId) -> String {
    format!("<{}{}>", base, id.as_string())
}

fn predicate_uri(base: &str, subject: &NodeId, predicate: Predicate) -> String {
    match predicate {
        Predicate::Type => format!("<{}>", RDF_TYPE),
        Predicate::Label => format!("<{}>", RDFS_LABEL),
        _ => format!("<{}{}/{}>", base, subject.category(), predicate.name()),
    }
}

fn literal_term(lit: &Literal) -> String {
    match lit {
        Literal::Bool(v) => format!("\"{}\"^^<{}boolean>", v, XSD),
        Literal::Int(v) => format!("\"{}\"^^<{}integer>", v, XSD),
        Literal::Float(v) => format!("\"{}\"^^<{}double>", xsd_double(*v), XSD),
        Literal::Text(v) => format!("\"{}\"", escape(v)),
    }
}

/// Lexical form of an `xsd:double`.
fn xsd_double(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "INF".to_string()
    } else if v == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        format!("{:?}", v)
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}
