use chrono::NaiveDate;

use crate::{
    Amount, CategoryTotal, Expense, ExpenseChanges, ExpenseFilter, ExpenseOrder, NewExpense,
    ResultStore, StoreError, document::remove_owned,
};

use super::{Store, with_read, with_write};

/// Filter and order expenses. Sorting is stable, so ties keep storage order.
pub fn select_expenses(
    expenses: Vec<Expense>,
    filter: ExpenseFilter,
    order: ExpenseOrder,
    today: NaiveDate,
) -> Vec<Expense> {
    let mut selected: Vec<Expense> = expenses
        .into_iter()
        .filter(|e| filter.matches(e, today))
        .collect();
    match order {
        ExpenseOrder::Insertion => {}
        ExpenseOrder::DateDesc => selected.sort_by(|a, b| b.date.cmp(&a.date)),
        ExpenseOrder::CreatedAtDesc => selected.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
    selected
}

/// Sum amounts per category, keeping categories in first-seen order.
pub fn group_by_category<'a>(
    expenses: impl IntoIterator<Item = &'a Expense>,
) -> ResultStore<Vec<CategoryTotal>> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for expense in expenses {
        match totals.iter_mut().find(|t| t.category == expense.category) {
            Some(total) => {
                total.amount = total.amount.checked_add(expense.amount).ok_or_else(|| {
                    StoreError::InvalidAmount(format!("total of {:?} too large", total.category))
                })?;
            }
            None => totals.push(CategoryTotal {
                category: expense.category.clone(),
                amount: expense.amount,
            }),
        }
    }
    Ok(totals)
}

impl Store {
    /// Insert an expense and return its id.
    pub async fn insert_expense(&self, new: NewExpense) -> ResultStore<u64> {
        let created_at = self.now();
        let ids = self.id_strategy();
        with_write!(self, |doc| {
            let id = ids.next_id(&doc.expenses);
            doc.expenses.push(new.into_expense(id, created_at));
            (id, true)
        })
    }

    pub async fn expenses(
        &self,
        filter: ExpenseFilter,
        order: ExpenseOrder,
    ) -> ResultStore<Vec<Expense>> {
        let today = self.today();
        with_read!(self, |doc| select_expenses(doc.expenses, filter, order, today))
    }

    /// Replace amount, category, description and date of the expense
    /// `(id, user_id)`.
    ///
    /// Returns the affected count: `0` when the pair matches nothing, in which
    /// case the document is not rewritten.
    pub async fn update_expense(
        &self,
        id: u64,
        user_id: u64,
        changes: ExpenseChanges,
    ) -> ResultStore<usize> {
        with_write!(self, |doc| {
            match doc
                .expenses
                .iter_mut()
                .find(|e| e.id == id && e.user_id == user_id)
            {
                Some(expense) => {
                    expense.apply(changes);
                    (1, true)
                }
                None => (0, false),
            }
        })
    }

    /// Delete the expense `(id, user_id)`. Returns the affected count.
    pub async fn delete_expense(&self, id: u64, user_id: u64) -> ResultStore<usize> {
        with_write!(self, |doc| {
            let removed = remove_owned(&mut doc.expenses, id, user_id);
            (removed, removed > 0)
        })
    }

    /// Total of the matching amounts; `0` when nothing matches.
    pub async fn sum_expenses(&self, filter: ExpenseFilter) -> ResultStore<Amount> {
        let today = self.today();
        with_read!(self, |doc| {
            Amount::checked_sum(
                doc.expenses
                    .iter()
                    .filter(|e| filter.matches(e, today))
                    .map(|e| e.amount),
            )?
        })
    }

    pub async fn count_expenses(&self, filter: ExpenseFilter) -> ResultStore<usize> {
        let today = self.today();
        with_read!(self, |doc| {
            doc.expenses
                .iter()
                .filter(|e| filter.matches(e, today))
                .count()
        })
    }

    pub async fn expenses_by_category(
        &self,
        filter: ExpenseFilter,
    ) -> ResultStore<Vec<CategoryTotal>> {
        let today = self.today();
        with_read!(self, |doc| {
            group_by_category(doc.expenses.iter().filter(|e| filter.matches(e, today)))?
        })
    }
}
