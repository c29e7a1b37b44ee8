use std::collections::{BTreeMap, btree_map::Entry};

use tracing::{debug, warn};

use crate::{
    account::{Account, CustomerId},
    command::BankCommand,
    customer::Customer,
};

use super::{BankProcessor, ProcessError, StepOutcome};

#[derive(Debug, Default)]
pub struct InMemoryBankProcessor {
    pub customers: BTreeMap<CustomerId, Customer>,
}

impl InMemoryBankProcessor {
    fn customer_mut(&mut self, customer_id: &str) -> Result<&mut Customer, ProcessError> {
        self.customers
            .get_mut(customer_id)
            .ok_or_else(|| ProcessError::UnknownCustomer(customer_id.to_owned()))
    }

    fn execute(&mut self, command: BankCommand) -> Result<StepOutcome, ProcessError> {
        match command {
            BankCommand::RegisterCustomer {
                customer_id,
                name,
                email,
            } => {
                let Entry::Vacant(entry) = self.customers.entry(customer_id.clone()) else {
                    return Err(ProcessError::DuplicateCustomer(customer_id));
                };
                entry.insert(Customer::new(customer_id.clone(), name.clone(), email));
                Ok(StepOutcome::Registered { customer_id, name })
            }
            BankCommand::OpenAccount {
                customer_id,
                account_number,
                initial_deposit,
            } => {
                let customer = self.customer_mut(&customer_id)?;
                let account = customer.create_account(account_number, initial_deposit)?;
                let (account_number, balance) =
                    (account.account_number().to_owned(), account.balance());
                Ok(StepOutcome::Opened {
                    name: customer.name().to_owned(),
                    account_number,
                    balance,
                })
            }
            BankCommand::Deposit {
                customer_id,
                amount,
            } => {
                let customer = self.customer_mut(&customer_id)?;
                let transaction = account_of(customer)?.deposit(amount)?;
                Ok(StepOutcome::Deposited {
                    name: customer.name().to_owned(),
                    transaction,
                })
            }
            BankCommand::Withdraw {
                customer_id,
                amount,
            } => {
                let customer = self.customer_mut(&customer_id)?;
                let transaction = account_of(customer)?.withdraw(amount)?;
                Ok(StepOutcome::Withdrew {
                    name: customer.name().to_owned(),
                    transaction,
                })
            }
            BankCommand::ShowBalance { customer_id } => {
                let customer = self.customer_mut(&customer_id)?;
                let balance = account_of(customer)?.balance();
                Ok(StepOutcome::Balance {
                    name: customer.name().to_owned(),
                    balance,
                })
            }
            BankCommand::PrintStatement { customer_id } => {
                let customer = self.customer_mut(&customer_id)?;
                Ok(StepOutcome::Statement(
                    account_of(customer)?.statement().to_string(),
                ))
            }
        }
    }
}

fn account_of(customer: &mut Customer) -> Result<&mut Account, ProcessError> {
    let customer_id = customer.customer_id().to_owned();
    customer
        .account_mut()
        .ok_or(ProcessError::NoAccount(customer_id))
}

impl BankProcessor for InMemoryBankProcessor {
    fn process_command(&mut self, command: BankCommand) -> Result<StepOutcome, ProcessError> {
        let customer_id = command.customer_id().to_owned();
        let result = self.execute(command);
        match &result {
            Ok(outcome) => debug!(customer = %customer_id, ?outcome, "command processed"),
            Err(err) => warn!(customer = %customer_id, %err, "command rejected"),
        }
        result
    }
}
