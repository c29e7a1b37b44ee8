use std::io::Read;

use crate::command::ScriptStep;
use csv::{Position, StringRecord, StringRecordsIntoIter, Trim};

/// Reads a banking script in CSV format, yielding each step together with
/// the line it was read from.
pub struct ScriptParser<R> {
    records: StringRecordsIntoIter<R>,
    headers: StringRecord,
}

impl<R> ScriptParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> csv::Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);
        let headers = reader.headers()?.clone();

        Ok(Self {
            records: reader.into_records(),
            headers,
        })
    }
}

impl<R> Iterator for ScriptParser<R>
where
    R: Read,
{
    type Item = (u64, csv::Result<ScriptStep>);

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.records.next()? {
            Ok(record) => (
                record.position().map_or(0, Position::line),
                record.deserialize(Some(&self.headers)),
            ),
            Err(err) => (err.position().map_or(0, Position::line), Err(err)),
        };
        Some(row)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::command::StepKind;

    use super::*;

    #[test]
    fn parse_script_rows() {
        let script = "type, customer, name, email, account, amount\n\
                      customer, CUST001, John Doe, john@email.com, ,\n\
                      open, CUST001, , , ACC1, 2500.50\n\
                      balance, CUST001, , , ,\n";
        let rows: Vec<_> = ScriptParser::new(script.as_bytes())
            .unwrap()
            .map(|(line, step)| (line, step.unwrap()))
            .collect();
        assert_eq!(rows.len(), 3);

        let (line, customer) = &rows[0];
        assert_eq!(*line, 2);
        assert_eq!(customer.kind, StepKind::Customer);
        assert_eq!(customer.name.as_deref(), Some("John Doe"));
        assert_eq!(customer.account, None);
        assert_eq!(customer.amount, None);

        let (line, open) = &rows[1];
        assert_eq!(*line, 3);
        assert_eq!(open.account.as_deref(), Some("ACC1"));
        assert_eq!(open.amount, Some(Decimal::new(250050, 2)));

        let (line, balance) = &rows[2];
        assert_eq!(*line, 4);
        assert_eq!(balance.kind, StepKind::Balance);
        assert_eq!(balance.customer, "CUST001");
    }

    #[test]
    fn report_malformed_row() {
        let script = "type,customer,name,email,account,amount\n\
                      transfer,CUST001,,,,10\n";
        let mut parser = ScriptParser::new(script.as_bytes()).unwrap();
        let (line, step) = parser.next().unwrap();
        assert_eq!(line, 2);
        assert!(step.is_err());
        assert!(parser.next().is_none());
    }
}
