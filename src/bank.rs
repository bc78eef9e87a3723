//! Bank accounts: two variants behind a shared [`Account`] capability.
//!
//! A private ledger records every posted movement together with the balance
//! it left behind. Savings adds monthly interest and a withdrawal cap;
//! checking adds overdraft room on withdrawals. Month-end processing and
//! transfers drive both variants through the trait only.

use chrono::{DateTime, Utc};
use std::fmt;

/// Monthly withdrawals allowed on a savings account.
pub const SAVINGS_WITHDRAWALS_PER_MONTH: u32 = 6;

const SAVINGS_FEE: f64 = 3.0;
const SAVINGS_FEE_WAIVER_BALANCE: f64 = 500.0;
const CHECKING_FEE: f64 = 10.0;
const CHECKING_FEE_WAIVER_BALANCE: f64 = 1000.0;

/// Format an amount for display, cents always shown.
pub fn usd(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Kind of a posted ledger movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    InitialDeposit,
    Deposit,
    Withdrawal,
    Interest,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InitialDeposit => "Initial Deposit",
            Self::Deposit => "Deposit",
            Self::Withdrawal => "Withdrawal",
            Self::Interest => "Interest",
        }
    }
}

/// A single posted movement and the balance it left behind.
#[derive(Debug, Clone)]
pub struct Transaction {
    kind: TransactionKind,
    amount: f64,
    at: DateTime<Utc>,
    balance_after: f64,
    note: Option<String>,
}

impl Transaction {
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }

    pub fn balance_after(&self) -> f64 {
        self.balance_after
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} on {} (Balance: {})",
            self.kind.as_str(),
            usd(self.amount),
            self.at.format("%Y-%m-%d %H:%M:%S UTC"),
            usd(self.balance_after)
        )?;
        if let Some(note) = &self.note {
            write!(f, " - {}", note)?;
        }
        Ok(())
    }
}

/// Why a movement was refused. Nothing is posted when one of these comes
/// back.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountError {
    /// Deposits and withdrawals must be strictly positive.
    NonPositiveAmount,
    /// The balance does not cover the requested amount.
    InsufficientFunds { requested: f64, available: f64 },
    /// The monthly withdrawal allowance is used up.
    WithdrawalLimitReached { limit: u32 },
    /// The request exceeds balance plus overdraft room.
    OverdraftExceeded { requested: f64, available: f64 },
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Amount must be positive"),
            Self::InsufficientFunds {
                requested,
                available,
            } => write!(
                f,
                "Insufficient funds: requested {}, available {}",
                usd(*requested),
                usd(*available)
            ),
            Self::WithdrawalLimitReached { limit } => {
                write!(f, "Withdrawal limit reached ({} per month)", limit)
            }
            Self::OverdraftExceeded {
                requested,
                available,
            } => write!(
                f,
                "Amount exceeds available funds including overdraft: requested {}, available {}",
                usd(*requested),
                usd(*available)
            ),
        }
    }
}

impl std::error::Error for AccountError {}

/// Capability shared by the account variants.
///
/// Month-end processing and transfers hold `&mut dyn Account` and never
/// look at the concrete type; fee rules and month-close behavior come from
/// whichever variant is behind the reference.
pub trait Account {
    fn holder(&self) -> &str;

    /// Account number with everything but the last four digits masked.
    fn masked_number(&self) -> String;

    fn balance(&self) -> f64;

    /// Post a deposit, returning the new balance.
    fn deposit(&mut self, amount: f64) -> Result<f64, AccountError>;

    /// Post a withdrawal, returning the new balance.
    fn withdraw(&mut self, amount: f64) -> Result<f64, AccountError>;

    /// Fee due at month close. Variants waive it above their own balance
    /// threshold.
    fn monthly_fee(&self) -> f64;

    /// Variant-specific month-close work (interest, counter resets).
    /// Returns the interest credited, if any was.
    fn close_month(&mut self) -> Option<f64>;

    /// Every posted movement, oldest first.
    fn history(&self) -> &[Transaction];

    /// One-line account summary.
    fn summary(&self) -> String {
        format!(
            "Account: {} | Holder: {} | Balance: {}",
            self.masked_number(),
            self.holder(),
            usd(self.balance())
        )
    }
}

/// Ledger core embedded by both variants: holder, number, balance, and the
/// posted history. Variants decide whether a movement is allowed; the
/// ledger only posts.
#[derive(Debug, Clone)]
struct Ledger {
    holder: String,
    number: String,
    balance: f64,
    history: Vec<Transaction>,
}

impl Ledger {
    fn open(holder: String, number: String, opening_deposit: f64) -> Self {
        let mut ledger = Self {
            holder,
            number,
            balance: 0.0,
            history: Vec::new(),
        };
        ledger.credit(TransactionKind::InitialDeposit, opening_deposit);
        ledger
    }

    /// Post a credit and return the new balance.
    fn credit(&mut self, kind: TransactionKind, amount: f64) -> f64 {
        self.balance += amount;
        self.record(kind, amount);
        self.balance
    }

    /// Post a debit and return the new balance.
    fn debit(&mut self, kind: TransactionKind, amount: f64) -> f64 {
        self.balance -= amount;
        self.record(kind, amount);
        self.balance
    }

    fn record(&mut self, kind: TransactionKind, amount: f64) {
        self.history.push(Transaction {
            kind,
            amount,
            at: Utc::now(),
            balance_after: self.balance,
            note: None,
        });
    }

    fn masked_number(&self) -> String {
        // Last four characters, never splitting a multi-byte one.
        let start = self
            .number
            .char_indices()
            .rev()
            .nth(3)
            .map(|(i, _)| i)
            .unwrap_or(0);
        format!("****{}", &self.number[start..])
    }
}

/// Savings account: monthly interest, capped withdrawals.
#[derive(Debug, Clone)]
pub struct Savings {
    ledger: Ledger,
    interest_rate: f64,
    withdrawals_this_month: u32,
}

impl Savings {
    /// Open a savings account. `interest_rate` is annual, in percent
    /// (2.5 means 2.5%).
    pub fn open(
        holder: String,
        number: String,
        opening_deposit: f64,
        interest_rate: f64,
    ) -> Self {
        Self {
            ledger: Ledger::open(holder, number, opening_deposit),
            interest_rate,
            withdrawals_this_month: 0,
        }
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    pub fn withdrawals_this_month(&self) -> u32 {
        self.withdrawals_this_month
    }

    /// One month of interest on the current balance.
    fn monthly_interest(&self) -> f64 {
        self.ledger.balance * self.interest_rate / 100.0 / 12.0
    }
}

impl Account for Savings {
    fn holder(&self) -> &str {
        &self.ledger.holder
    }

    fn masked_number(&self) -> String {
        self.ledger.masked_number()
    }

    fn balance(&self) -> f64 {
        self.ledger.balance
    }

    fn deposit(&mut self, amount: f64) -> Result<f64, AccountError> {
        if amount <= 0.0 {
            return Err(AccountError::NonPositiveAmount);
        }
        Ok(self.ledger.credit(TransactionKind::Deposit, amount))
    }

    fn withdraw(&mut self, amount: f64) -> Result<f64, AccountError> {
        // The allowance check comes before the amount checks.
        if self.withdrawals_this_month >= SAVINGS_WITHDRAWALS_PER_MONTH {
            return Err(AccountError::WithdrawalLimitReached {
                limit: SAVINGS_WITHDRAWALS_PER_MONTH,
            });
        }
        if amount <= 0.0 {
            return Err(AccountError::NonPositiveAmount);
        }
        if amount > self.ledger.balance {
            return Err(AccountError::InsufficientFunds {
                requested: amount,
                available: self.ledger.balance,
            });
        }
        let balance = self.ledger.debit(TransactionKind::Withdrawal, amount);
        self.withdrawals_this_month += 1;
        Ok(balance)
    }

    fn monthly_fee(&self) -> f64 {
        if self.ledger.balance > SAVINGS_FEE_WAIVER_BALANCE {
            0.0
        } else {
            SAVINGS_FEE
        }
    }

    fn close_month(&mut self) -> Option<f64> {
        self.withdrawals_this_month = 0;
        let interest = self.monthly_interest();
        if interest > 0.0 {
            self.ledger.credit(TransactionKind::Interest, interest);
            Some(interest)
        } else {
            None
        }
    }

    fn history(&self) -> &[Transaction] {
        &self.ledger.history
    }
}

/// Checking account: overdraft room on withdrawals.
#[derive(Debug, Clone)]
pub struct Checking {
    ledger: Ledger,
    overdraft_limit: f64,
}

impl Checking {
    /// Open a checking account with the given overdraft limit.
    pub fn open(
        holder: String,
        number: String,
        opening_deposit: f64,
        overdraft_limit: f64,
    ) -> Self {
        Self {
            ledger: Ledger::open(holder, number, opening_deposit),
            overdraft_limit,
        }
    }

    pub fn overdraft_limit(&self) -> f64 {
        self.overdraft_limit
    }

    /// Overdraft currently drawn; zero while the balance is non-negative.
    pub fn overdraft_in_use(&self) -> f64 {
        (-self.ledger.balance).max(0.0)
    }

    /// Post a withdrawal as a check to a named payee.
    pub fn write_check(&mut self, payee: &str, amount: f64) -> Result<f64, AccountError> {
        let balance = self.withdraw(amount)?;
        // The withdrawal just posted is the check; tag it with the payee.
        if let Some(tx) = self.ledger.history.last_mut() {
            tx.note = Some(format!("check to {}", payee));
        }
        Ok(balance)
    }
}

impl Account for Checking {
    fn holder(&self) -> &str {
        &self.ledger.holder
    }

    fn masked_number(&self) -> String {
        self.ledger.masked_number()
    }

    fn balance(&self) -> f64 {
        self.ledger.balance
    }

    fn deposit(&mut self, amount: f64) -> Result<f64, AccountError> {
        if amount <= 0.0 {
            return Err(AccountError::NonPositiveAmount);
        }
        Ok(self.ledger.credit(TransactionKind::Deposit, amount))
    }

    fn withdraw(&mut self, amount: f64) -> Result<f64, AccountError> {
        if amount <= 0.0 {
            return Err(AccountError::NonPositiveAmount);
        }
        let available = self.ledger.balance + self.overdraft_limit;
        if amount > available {
            return Err(AccountError::OverdraftExceeded {
                requested: amount,
                available,
            });
        }
        Ok(self.ledger.debit(TransactionKind::Withdrawal, amount))
    }

    fn monthly_fee(&self) -> f64 {
        if self.ledger.balance > CHECKING_FEE_WAIVER_BALANCE {
            0.0
        } else {
            CHECKING_FEE
        }
    }

    fn close_month(&mut self) -> Option<f64> {
        None
    }

    fn history(&self) -> &[Transaction] {
        &self.ledger.history
    }
}

/// Move funds between two accounts. The withdrawal runs first; if it is
/// refused the deposit never happens and neither account changes.
pub fn transfer(
    from: &mut dyn Account,
    to: &mut dyn Account,
    amount: f64,
) -> Result<(), AccountError> {
    from.withdraw(amount)?;
    to.deposit(amount)?;
    Ok(())
}
