use std::io::Write;

/// A disjunction of DIMACS-signed literals (negative = negated variable).
pub type Clause = Vec<i32>;

/// An accumulated CNF formula ready for serialization.
#[derive(Debug, Clone)]
pub struct CnfFormula {
    pub num_vars: i32,
    pub clauses: Vec<Clause>,
}

/// Serialize in DIMACS CNF format. This is the byte-level contract at the
/// solver process boundary: a `p cnf <vars> <clauses>` header, then one line
/// per clause listing its literals followed by the `0` sentinel.
pub fn write_dimacs<W: Write>(out: &mut W, formula: &CnfFormula) -> std::io::Result<()> {
    writeln!(out, "p cnf {} {}", formula.num_vars, formula.clauses.len())?;
    for clause in &formula.clauses {
        for lit in clause {
            write!(out, "{} ", lit)?;
        }
        writeln!(out, "0")?;
    }
    Ok(())
}

pub fn to_dimacs_string(formula: &CnfFormula) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec<u8> cannot fail.
    write_dimacs(&mut buf, formula).unwrap();
    String::from_utf8(buf).unwrap()
}
