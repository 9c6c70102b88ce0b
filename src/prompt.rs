use anyhow::Result;

use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use crate::{sales::Sales, summary::Record};

/// Asks the user whether to add a record and, if so, reads one.
///
/// Questions are written to `output` and answers read line by line from
/// `input`. Only `y` or `yes` (in any case) counts as agreement. The sales
/// question is repeated until the answer is a non-negative whole number.
///
/// Returns `None` if the user declines or `input` runs out.
///
/// # Errors
///
/// Returns any errors from reading `input` or writing `output`.
pub fn prompt_for_record(mut input: impl BufRead, mut output: impl Write) -> Result<Option<Record>> {
    let Some(answer) = ask(&mut input, &mut output, "Add a new record to the CSV? (y/n): ")? else {
        return Ok(None);
    };
    if !matches!(answer.to_lowercase().as_str(), "y" | "yes") {
        return Ok(None);
    }
    writeln!(output, "Adding a new record")?;
    let Some(name) = ask(&mut input, &mut output, "Name: ")? else {
        return Ok(None);
    };
    let Some(department) = ask(&mut input, &mut output, "Department: ")? else {
        return Ok(None);
    };
    loop {
        let Some(answer) = ask(&mut input, &mut output, "Sales: ")? else {
            return Ok(None);
        };
        match Sales::from_str(&answer) {
            Ok(sales) => return Ok(Some(Record::new(&name, &department, sales))),
            Err(_) => writeln!(
                output,
                "Sales must be a non-negative whole number. Please try again."
            )?,
        }
    }
}

/// Writes `question` and returns the trimmed answer, or `None` at end of input.
fn ask(input: &mut impl BufRead, output: &mut impl Write, question: &str) -> Result<Option<String>> {
    write!(output, "{question}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn run(input: &str) -> (Option<Record>, String) {
        let mut output = Vec::new();
        let record = prompt_for_record(Cursor::new(input), &mut output).unwrap();
        (record, String::from_utf8(output).unwrap())
    }

    #[test]
    fn prompt_for_record_fn_reads_record_after_yes() {
        let (record, output) = run("y\n  Frank \nSales\n1300\n");
        assert_eq!(record, Some(Record::new("Frank", "Sales", Sales::new(1300))));
        assert!(output.contains("Name: "));
        assert!(output.contains("Department: "));
    }

    #[test]
    fn prompt_for_record_fn_accepts_yes_in_any_case() {
        let (record, _) = run("YES\nGina\nHR\n0\n");
        assert_eq!(record, Some(Record::new("Gina", "HR", Sales::default())));
    }

    #[test]
    fn prompt_for_record_fn_returns_none_when_declined() {
        let (record, output) = run("n\nFrank\nSales\n1300\n");
        assert_eq!(record, None);
        assert!(!output.contains("Name: "));
    }

    #[test]
    fn prompt_for_record_fn_asks_again_for_invalid_sales() {
        let (record, output) = run("y\nFrank\nSales\n-3\nlots\n12.5\n40\n");
        assert_eq!(record, Some(Record::new("Frank", "Sales", Sales::new(40))));
        assert_eq!(output.matches("Please try again.").count(), 3);
    }

    #[test]
    fn prompt_for_record_fn_returns_none_at_end_of_input() {
        assert_eq!(run("").0, None);
        assert_eq!(run("y\nFrank\n").0, None);
        assert_eq!(run("y\nFrank\nSales\nbad\n").0, None);
    }
}
