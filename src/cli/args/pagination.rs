//! Pagination argument types for CLI commands

use clap::Args;

use crate::client::PaginationParams;

/// Shared pagination arguments for list commands.
///
/// Flatten this into any command that supports pagination:
/// ```ignore
/// Members {
///     #[command(flatten)]
///     pagination: PaginationArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct PaginationArgs {
    /// Results per request (max 100)
    #[arg(long)]
    pub per_page: Option<usize>,

    /// Fetch only this page (1-indexed) instead of every page
    #[arg(long, short = 'p')]
    pub page: Option<usize>,
}

impl PaginationArgs {
    /// Convert CLI args to API pagination params, falling back to the
    /// configured page size.
    pub fn to_params(&self, default_per_page: usize) -> PaginationParams {
        let mut params = PaginationParams::new().per_page(self.per_page.unwrap_or(default_per_page));
        if let Some(page) = self.page {
            params = params.page(page);
        }
        params
    }

    /// Whether a single page was requested
    pub fn single_page(&self) -> bool {
        self.page.is_some()
    }
}
