//! Service wiring for the HTTP layer.

use std::sync::Arc;

use depot_catalog::InMemoryCatalog;
use depot_orders::{OrderEngine, StockService};
use depot_store::InMemoryLedgerStore;

/// Everything a handler needs, behind one `Extension<Arc<AppServices>>`.
pub struct AppServices {
    pub store: Arc<InMemoryLedgerStore>,
    pub catalog: Arc<InMemoryCatalog>,
    pub orders: OrderEngine<Arc<InMemoryLedgerStore>, Arc<InMemoryCatalog>>,
    pub stocks: StockService<Arc<InMemoryLedgerStore>, Arc<InMemoryCatalog>>,
}

pub fn build_services(seed_demo: bool) -> AppServices {
    let store = Arc::new(InMemoryLedgerStore::new());
    let catalog = Arc::new(InMemoryCatalog::new());

    let services = AppServices {
        orders: OrderEngine::new(store.clone(), catalog.clone()),
        stocks: StockService::new(store.clone(), catalog.clone()),
        store,
        catalog,
    };

    if seed_demo {
        seed_demo_data(&services);
    }

    services
}

const DEMO_PRODUCTS: usize = 20;
const DEMO_WAREHOUSES: usize = 5;

/// Populate the catalog with demo products/warehouses and an opening stock
/// load per (product, warehouse) pair. Quantities are deterministic so the
/// demo dataset is reproducible; roughly half the pairs start empty.
fn seed_demo_data(services: &AppServices) {
    let tiers = ["Basic", "Premium", "Ultra", "Pro", "Elite"];

    let products: Vec<_> = (0..DEMO_PRODUCTS)
        .map(|i| {
            let name = format!("Demo Product {} {}", i + 1, tiers[i % tiers.len()]);
            let price = 500 + (i as u64 * 733) % 99_500;
            services.catalog.add_product(name, price)
        })
        .collect();

    let warehouses: Vec<_> = (0..DEMO_WAREHOUSES)
        .map(|i| services.catalog.add_warehouse(format!("Warehouse {}", i + 1)))
        .collect();

    let mut seeded = 0usize;
    for (pi, product) in products.iter().enumerate() {
        for (wi, warehouse) in warehouses.iter().enumerate() {
            let roll = (pi * 31 + wi * 17) % 4;
            let quantity = match roll {
                0 | 1 => 0,
                2 => 1 + ((pi * 13 + wi * 7) % 100) as i64,
                _ => 10 + ((pi * 41 + wi * 11) % 491) as i64,
            };
            if quantity == 0 {
                continue;
            }
            if let Err(e) = services.stocks.load_initial(
                product.id,
                warehouse.id,
                quantity,
                Some("Initial inventory load"),
            ) {
                tracing::warn!(error = %e, "demo seed skipped a stock load");
                continue;
            }
            seeded += 1;
        }
    }

    tracing::info!(
        products = products.len(),
        warehouses = warehouses.len(),
        stock_entries = seeded,
        "seeded demo data"
    );
}
