use super::details::CryptoAssetDetails;
use crate::shared::list_controller::ListController;
use crate::shared::list_page::{list_page, ListColumns};
use contracts::domain::a004_crypto_asset::{CryptoAssetResource, CryptoAssetRow};
use leptos::prelude::*;
use thaw::*;

/// `0x1234...abcd` for long addresses
fn short_address(address: &str) -> String {
    if address.chars().count() <= 14 {
        return address.to_string();
    }
    let head: String = address.chars().take(6).collect();
    let tail: String = address.chars().skip(address.chars().count() - 4).collect();
    format!("{}...{}", head, tail)
}

fn cells(row: &CryptoAssetRow) -> AnyView {
    let symbol = row.symbol.clone();
    let name = row.name.clone();
    let chain = row.chain.clone();
    let address = row.contract_address.clone().unwrap_or_default();
    let short = short_address(&address);
    let decimals = row.decimals;
    view! {
        <TableCell><TableCellLayout><code>{symbol}</code></TableCellLayout></TableCell>
        <TableCell><TableCellLayout truncate=true>{name}</TableCellLayout></TableCell>
        <TableCell><TableCellLayout>{chain}</TableCellLayout></TableCell>
        <TableCell>
            <TableCellLayout>
                <span title=address>{short}</span>
            </TableCellLayout>
        </TableCell>
        <TableCell class="table__cell--right"><TableCellLayout>{decimals}</TableCellLayout></TableCell>
    }
    .into_any()
}

#[component]
pub fn CryptoAssetList() -> impl IntoView {
    let ctrl = ListController::<CryptoAssetResource>::new();

    list_page(
        ctrl,
        ListColumns {
            headers: &["Symbol", "Name", "Chain", "Contract", "Decimals"],
            cells,
        },
        |ctrl| view! { <CryptoAssetDetails ctrl=ctrl /> }.into_any(),
    )
}

#[cfg(test)]
mod tests {
    use super::short_address;

    #[test]
    fn long_addresses_are_shortened() {
        assert_eq!(
            short_address("0xdAC17F958D2ee523a2206206994597C13D831ec7"),
            "0xdAC1...1ec7"
        );
        assert_eq!(short_address("native"), "native");
        assert_eq!(short_address(""), "");
    }
}
