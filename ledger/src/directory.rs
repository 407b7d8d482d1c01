//! Account directory: an unbalanced binary search tree keyed by account number.
//!
//! Each node owns its account and both children. Inserts never rebalance, so a
//! strictly increasing insert order degrades lookups to a linear walk.

use std::cmp::Ordering;

use tracing::{debug, info, instrument, warn};

use tellerbook_common::{Result, TellerError};

use crate::account::Account;
use crate::snapshot::AccountRow;
use crate::store::FileStore;

#[derive(Debug)]
struct Node {
    account: Account,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn new(account: Account) -> Self {
        Self {
            account,
            left: None,
            right: None,
        }
    }
}

/// Ordered index of accounts.
///
/// Invariant: every account in a node's left subtree has a smaller account
/// number than the node, every account in the right subtree a larger one.
#[derive(Debug, Default)]
pub struct Directory {
    root: Option<Box<Node>>,
    len: usize,
}

impl Directory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from persisted rows. Rows repeating an earlier
    /// account number, or that [`Directory::insert`] rejects, are skipped.
    pub fn from_rows(rows: impl IntoIterator<Item = AccountRow>) -> Self {
        let mut directory = Self::new();
        for row in rows {
            if let Err(e) = directory.insert(Account::from_row(row)) {
                debug!(error = %e, "Skipping persisted row");
            }
        }
        directory
    }

    /// Insert an account at the first free leaf on its search path.
    ///
    /// If the account number is already present the existing account is kept,
    /// `account` is dropped unchanged and `DuplicateKey` is returned. Accounts
    /// whose fields cannot be written to the accounts file are rejected with
    /// `InvalidAccount`.
    pub fn insert(&mut self, account: Account) -> Result<()> {
        if let Err(e) = account.validate() {
            warn!(error = %e, "Unstorable account, insert discarded");
            return Err(e);
        }

        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match account.account_number().cmp(node.account.account_number()) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    warn!(
                        account = %account.account_number(),
                        "Duplicate account number, insert discarded"
                    );
                    return Err(TellerError::DuplicateKey(account.account_number().clone()));
                }
            };
        }

        info!(account = %account.account_number(), "Account inserted");
        *slot = Some(Box::new(Node::new(account)));
        self.len += 1;
        Ok(())
    }

    /// Find the account with this number and PIN.
    ///
    /// The tree is descended by account number alone; the PIN is compared only
    /// at the node with the equal key. A wrong PIN and an unknown number both
    /// give `None`.
    pub fn search(&self, account_number: &str, pin: &str) -> Option<&Account> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match account_number.cmp(node.account.account_number().as_str()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => {
                    return node
                        .account
                        .matches(account_number, pin)
                        .then_some(&node.account);
                }
            }
        }
        None
    }

    /// Mutable counterpart of [`Directory::search`], same credential rules.
    pub fn search_mut(&mut self, account_number: &str, pin: &str) -> Option<&mut Account> {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match account_number.cmp(node.account.account_number().as_str()) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
                Ordering::Equal => {
                    if node.account.matches(account_number, pin) {
                        return Some(&mut node.account);
                    }
                    return None;
                }
            }
        }
        None
    }

    /// Like [`Directory::search`], but reports a miss as `NotFound`.
    pub fn authenticate(&self, account_number: &str, pin: &str) -> Result<&Account> {
        self.search(account_number, pin).ok_or(TellerError::NotFound)
    }

    /// Accounts in ascending account-number order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root.as_deref())
    }

    /// One row per account, in ascending account-number order.
    pub fn snapshot(&self) -> Vec<AccountRow> {
        self.iter().map(Account::to_row).collect()
    }

    /// Write every account to the accounts file in key order.
    /// Returns the number of accounts written.
    #[instrument(skip(self, store), fields(accounts = self.len))]
    pub fn save_all(&self, store: &FileStore) -> Result<usize> {
        let rows = self.snapshot();
        store.write_account_snapshot(&rows)?;
        Ok(rows.len())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut pending: Vec<(&Node, usize)> =
            self.root.as_deref().map(|n| (n, 1)).into_iter().collect();

        while let Some((node, depth)) = pending.pop() {
            height = height.max(depth);
            if let Some(left) = node.left.as_deref() {
                pending.push((left, depth + 1));
            }
            if let Some(right) = node.right.as_deref() {
                pending.push((right, depth + 1));
            }
        }

        height
    }
}

impl Drop for Directory {
    fn drop(&mut self) {
        // Unlink nodes one at a time so a degenerate tree does not recurse
        // once per level when dropped.
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

/// In-order iterator over a [`Directory`].
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn new(root: Option<&'a Node>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Account;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.account)
    }
}

impl<'a> IntoIterator for &'a Directory {
    type Item = &'a Account;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
