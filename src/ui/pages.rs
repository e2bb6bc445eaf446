//! Concrete frames of the ordering terminal
//!
//! Four pages make up the whole flow: the landing page (permanent base
//! frame), customer name entry, the menu listing (order and checkout
//! modes), and the table picker (also both modes). A draft order is
//! shared between the pages editing it; a booked order is read through
//! the registry by table id.

use std::cell::RefCell;
use std::rc::Rc;

use crate::app::context::AppContext;
use crate::app::navigator::{Frame, NavRequests};
use crate::assets::AssetState;
use crate::domain::catalog::CategoryFilter;
use crate::domain::order::{Order, parse_quantity};
use crate::domain::tables::TableId;
use crate::ui::event::UiEvent;
use crate::ui::view::{BackgroundState, MenuRow, PageBody, PageMode, PageView, SlotView};

/// An order still being assembled, shared by the pages editing it.
type DraftOrder = Rc<RefCell<Order>>;

const MSG_NAME_EMPTY: &str = "Nama tidak boleh kosong.";
const MSG_NAME_TAKEN: &str = "Nama sudah dipakai.";
const MSG_TABLES_FULL: &str =
    "Mohon maaf, meja sedang penuh. Silakan datang kembali di lain kesempatan.";
const MSG_ORDER_BOOKED: &str = "Berhasil membuat pesanan!";
const MSG_CHECKED_OUT: &str = "Berhasil melakukan checkout!";
const MSG_TABLE_OCCUPIED: &str = "Meja telah terisi!";
const MSG_TABLE_EMPTY: &str = "Meja ini kosong!";

fn background(ctx: &AppContext, url: &str) -> BackgroundState {
    match ctx.assets.state(url) {
        Some(AssetState::Ready(_)) => BackgroundState::Ready,
        Some(AssetState::Pending) => BackgroundState::Pending,
        _ => BackgroundState::Unavailable,
    }
}

fn menu_rows(order: &Order, filter: CategoryFilter) -> Vec<MenuRow> {
    order
        .lines_in(filter)
        .map(|line| {
            let entry = line.entry();
            MenuRow {
                id: entry.id.clone(),
                name: entry.name.clone(),
                category: entry.category,
                unit_price: entry.unit_price,
                attribute_label: entry.category.attribute_label(),
                attribute_value: entry.attribute_value,
                quantity: line.quantity(),
            }
        })
        .collect()
}

/// Permanent base frame: entry point into both flows
pub struct LandingPage;

impl LandingPage {
    const BACKGROUND: &'static str =
        "https://res.cloudinary.com/elhamdi/image/upload/v1670668326/landing_page_iycqcn.png";

    pub fn new() -> Self {
        Self
    }
}

impl Default for LandingPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame for LandingPage {
    fn title(&self) -> &str {
        "Kafe Daun-Daun Pacilkom v2.0"
    }

    fn on_show(&mut self, ctx: &mut AppContext) {
        ctx.assets.request(Self::BACKGROUND);
    }

    fn on_destroy(&mut self, ctx: &mut AppContext) {
        ctx.assets.cancel(Self::BACKGROUND);
    }

    fn view(&self, ctx: &AppContext) -> PageView {
        PageView {
            title: self.title().to_string(),
            background: background(ctx, Self::BACKGROUND),
            body: PageBody::Landing,
        }
    }

    fn handle(&mut self, ctx: &mut AppContext, event: UiEvent, nav: &mut NavRequests) {
        match event {
            UiEvent::StartOrder => nav.push(Box::new(CreateOrderPage::new(ctx))),
            UiEvent::StartCheckout => nav.push(Box::new(TablePage::for_checkout())),
            _ => {}
        }
    }
}

/// Name entry for a new order
///
/// The order is created up front with all quantities zero and a table
/// picked at random from the empty slots (`None` when the cafe is full,
/// which redirects on submit).
pub struct CreateOrderPage {
    order: DraftOrder,
}

impl CreateOrderPage {
    const BACKGROUND: &'static str =
        "https://res.cloudinary.com/elhamdi/image/upload/v1670658201/nama_vvegdu.png";

    pub fn new(ctx: &mut AppContext) -> Self {
        let table = ctx.tables.assign_random_available();
        let order = Order::new(&ctx.catalog, table, "");
        Self {
            order: Rc::new(RefCell::new(order)),
        }
    }
}

impl Frame for CreateOrderPage {
    fn title(&self) -> &str {
        "Buat Pesanan"
    }

    fn on_show(&mut self, ctx: &mut AppContext) {
        ctx.assets.request(Self::BACKGROUND);
    }

    fn on_destroy(&mut self, ctx: &mut AppContext) {
        ctx.assets.cancel(Self::BACKGROUND);
    }

    fn view(&self, ctx: &AppContext) -> PageView {
        PageView {
            title: self.title().to_string(),
            background: background(ctx, Self::BACKGROUND),
            body: PageBody::NameEntry {
                name: self.order.borrow().customer.clone(),
            },
        }
    }

    fn handle(&mut self, ctx: &mut AppContext, event: UiEvent, nav: &mut NavRequests) {
        match event {
            UiEvent::Input(name) => {
                self.order.borrow_mut().customer = name;
            }
            UiEvent::Submit => {
                let name = self.order.borrow().customer.clone();
                if name.is_empty() {
                    nav.notify(MSG_NAME_EMPTY);
                } else if ctx.tables.is_username_taken(&name) {
                    nav.notify(MSG_NAME_TAKEN);
                } else if ctx.tables.available().is_empty() {
                    // Terminal capacity condition: recover to the landing
                    // view instead of failing the operation.
                    nav.reset();
                    nav.notify(MSG_TABLES_FULL);
                } else {
                    nav.push(Box::new(MenuPage::for_order(Rc::clone(&self.order))));
                }
            }
            UiEvent::Back => nav.back(),
            _ => {}
        }
    }
}

enum OrderSource {
    /// In-progress order being edited before booking
    Draft(DraftOrder),
    /// Order already booked; read through the registry
    Booked(TableId),
}

/// The menu listing: quantities and running total
pub struct MenuPage {
    source: OrderSource,
    filter: CategoryFilter,
}

impl MenuPage {
    const BACKGROUND: &'static str =
        "https://res.cloudinary.com/elhamdi/image/upload/v1670665588/menu_a0yjvn.png";

    pub fn for_order(order: DraftOrder) -> Self {
        Self {
            source: OrderSource::Draft(order),
            filter: CategoryFilter::All,
        }
    }

    pub fn for_checkout(table: TableId) -> Self {
        Self {
            source: OrderSource::Booked(table),
            filter: CategoryFilter::All,
        }
    }

    fn mode(&self) -> PageMode {
        match self.source {
            OrderSource::Draft(_) => PageMode::Order,
            OrderSource::Booked(_) => PageMode::Checkout,
        }
    }

    fn with_order<R>(&self, ctx: &AppContext, f: impl FnOnce(&Order) -> R) -> Option<R> {
        match &self.source {
            OrderSource::Draft(order) => Some(f(&order.borrow())),
            OrderSource::Booked(table) => ctx.tables.order_at(*table).map(f),
        }
    }
}

impl Frame for MenuPage {
    fn title(&self) -> &str {
        "Menu"
    }

    fn on_show(&mut self, ctx: &mut AppContext) {
        ctx.assets.request(Self::BACKGROUND);
    }

    fn on_destroy(&mut self, ctx: &mut AppContext) {
        ctx.assets.cancel(Self::BACKGROUND);
    }

    fn view(&self, ctx: &AppContext) -> PageView {
        let (customer, table, rows, total) = self
            .with_order(ctx, |order| {
                (
                    order.customer.clone(),
                    order.table,
                    menu_rows(order, self.filter),
                    order.total_price(),
                )
            })
            .unwrap_or_else(|| (String::new(), None, Vec::new(), 0));

        PageView {
            title: self.title().to_string(),
            background: background(ctx, Self::BACKGROUND),
            body: PageBody::Menu {
                mode: self.mode(),
                filter: self.filter,
                customer,
                table,
                rows,
                total,
            },
        }
    }

    fn handle(&mut self, ctx: &mut AppContext, event: UiEvent, nav: &mut NavRequests) {
        match event {
            UiEvent::Filter(filter) => self.filter = filter,
            UiEvent::SetQuantity { entry_id, input } => {
                let OrderSource::Draft(order) = &self.source else {
                    return; // checkout view is read-only
                };
                match parse_quantity(&input) {
                    Ok(quantity) => {
                        if let Err(err) = order.borrow_mut().set_quantity(&entry_id, quantity) {
                            nav.notify(err.to_string());
                        }
                    }
                    Err(err) => nav.notify(err.to_string()),
                }
            }
            UiEvent::ChangeTable => {
                if let OrderSource::Draft(order) = &self.source {
                    nav.push(Box::new(TablePage::for_seating(Rc::clone(order))));
                }
            }
            UiEvent::Submit => match &self.source {
                OrderSource::Draft(order) => {
                    let table = order.borrow().table;
                    match table {
                        Some(table) => {
                            let snapshot = order.borrow().clone();
                            match ctx.tables.book(table, snapshot) {
                                Ok(()) => {
                                    nav.reset();
                                    nav.notify(MSG_ORDER_BOOKED);
                                }
                                Err(err) => nav.notify(err.to_string()),
                            }
                        }
                        None => {
                            nav.reset();
                            nav.notify(MSG_TABLES_FULL);
                        }
                    }
                }
                OrderSource::Booked(table) => {
                    ctx.tables.checkout(*table);
                    nav.back();
                    nav.notify(MSG_CHECKED_OUT);
                }
            },
            UiEvent::Back => nav.back(),
            _ => {}
        }
    }
}

enum TableTarget {
    /// Picking a table for an in-progress order
    Seat(DraftOrder),
    /// Picking an occupied table to check out
    Checkout,
}

/// The table picker grid
pub struct TablePage {
    target: TableTarget,
    selected: Option<TableId>,
}

impl TablePage {
    const BACKGROUND: &'static str =
        "https://res.cloudinary.com/elhamdi/image/upload/v1670679681/table_cgbpoe.png";

    pub fn for_seating(order: DraftOrder) -> Self {
        let selected = order.borrow().table;
        Self {
            target: TableTarget::Seat(order),
            selected,
        }
    }

    pub fn for_checkout() -> Self {
        Self {
            target: TableTarget::Checkout,
            selected: None,
        }
    }

    fn mode(&self) -> PageMode {
        match self.target {
            TableTarget::Seat(_) => PageMode::Order,
            TableTarget::Checkout => PageMode::Checkout,
        }
    }
}

impl Frame for TablePage {
    fn title(&self) -> &str {
        "Pilih Meja"
    }

    fn on_show(&mut self, ctx: &mut AppContext) {
        ctx.assets.request(Self::BACKGROUND);
    }

    fn on_destroy(&mut self, ctx: &mut AppContext) {
        ctx.assets.cancel(Self::BACKGROUND);
    }

    fn view(&self, ctx: &AppContext) -> PageView {
        let selecting = matches!(self.target, TableTarget::Seat(_));
        let slots = ctx
            .tables
            .table_ids()
            .map(|table| SlotView {
                table,
                occupied: !ctx.tables.is_available(table),
                selected: selecting && self.selected == Some(table),
            })
            .collect();

        PageView {
            title: self.title().to_string(),
            background: background(ctx, Self::BACKGROUND),
            body: PageBody::Tables {
                mode: self.mode(),
                slots,
                selected: self.selected,
            },
        }
    }

    fn handle(&mut self, ctx: &mut AppContext, event: UiEvent, nav: &mut NavRequests) {
        match event {
            UiEvent::ChooseTable(table) => match &self.target {
                TableTarget::Seat(_) => {
                    if ctx.tables.is_available(table) {
                        self.selected = Some(table);
                    } else {
                        nav.notify(MSG_TABLE_OCCUPIED);
                    }
                }
                TableTarget::Checkout => {
                    if ctx.tables.is_available(table) {
                        nav.notify(MSG_TABLE_EMPTY);
                    } else {
                        nav.push(Box::new(MenuPage::for_checkout(table)));
                    }
                }
            },
            UiEvent::Submit => {
                if let TableTarget::Seat(order) = &self.target {
                    order.borrow_mut().table = self.selected;
                    nav.back();
                }
            }
            UiEvent::Back => nav.back(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::navigator::Navigator;
    use crate::assets::{AssetCache, AssetFetchError, AssetFetcher};
    use crate::domain::catalog::{Catalog, CatalogEntry, Category};
    use crate::domain::tables::TableRegistry;
    use tiny_skia::Pixmap;

    /// Offline fetcher so page lifecycle hooks never touch the network.
    struct OfflineFetcher;

    impl AssetFetcher for OfflineFetcher {
        fn fetch(&self, url: &str) -> Result<Pixmap, AssetFetchError> {
            Err(AssetFetchError::Status {
                url: url.to_string(),
                status: 503,
            })
        }
    }

    fn test_ctx(table_count: u8) -> AppContext {
        let catalog = Catalog::new(vec![
            CatalogEntry::new("1", "Indomie Goreng", 15_000, Category::Meals, 4),
            CatalogEntry::new("2", "Es Teh", 5_000, Category::Drinks, 3),
        ]);
        AppContext::new(
            catalog,
            TableRegistry::with_seed(table_count, 7),
            AssetCache::with_fetcher(OfflineFetcher),
        )
    }

    fn navigator(ctx: &mut AppContext) -> Navigator {
        Navigator::new(ctx, || Box::new(LandingPage::new()))
    }

    fn dispatch(nav: &mut Navigator, ctx: &mut AppContext, event: UiEvent) {
        nav.dispatch(ctx, event).expect("base frame never pops");
    }

    fn toast_messages(nav: &mut Navigator) -> Vec<String> {
        nav.take_toasts().into_iter().map(|t| t.message).collect()
    }

    #[test]
    fn full_order_flow_books_a_table() {
        let mut ctx = test_ctx(2);
        let mut nav = navigator(&mut ctx);

        dispatch(&mut nav, &mut ctx, UiEvent::StartOrder);
        dispatch(&mut nav, &mut ctx, UiEvent::Input("Alice".into()));
        dispatch(&mut nav, &mut ctx, UiEvent::Submit);
        assert_eq!(nav.top().title(), "Menu");

        dispatch(
            &mut nav,
            &mut ctx,
            UiEvent::SetQuantity {
                entry_id: "1".into(),
                input: "2".into(),
            },
        );
        dispatch(
            &mut nav,
            &mut ctx,
            UiEvent::SetQuantity {
                entry_id: "2".into(),
                input: "3".into(),
            },
        );

        let PageBody::Menu { total, .. } = nav.view(&ctx).body else {
            panic!("expected menu view");
        };
        assert_eq!(total, 45_000);

        dispatch(&mut nav, &mut ctx, UiEvent::Submit);
        assert_eq!(nav.depth(), 1); // reset back to landing
        assert_eq!(toast_messages(&mut nav), vec![MSG_ORDER_BOOKED.to_string()]);

        let booked = ctx.tables.booked();
        assert_eq!(booked.len(), 1);
        let order = ctx.tables.order_at(booked[0]).unwrap();
        assert_eq!(order.customer, "Alice");
        assert_eq!(order.total_price(), 45_000);
        assert!(ctx.tables.is_username_taken("Alice"));
    }

    #[test]
    fn empty_and_duplicate_names_are_rejected() {
        let mut ctx = test_ctx(2);
        let mut nav = navigator(&mut ctx);

        // Book "Alice" through the real flow first.
        dispatch(&mut nav, &mut ctx, UiEvent::StartOrder);
        dispatch(&mut nav, &mut ctx, UiEvent::Input("Alice".into()));
        dispatch(&mut nav, &mut ctx, UiEvent::Submit);
        dispatch(&mut nav, &mut ctx, UiEvent::Submit);
        nav.take_toasts();

        dispatch(&mut nav, &mut ctx, UiEvent::StartOrder);
        dispatch(&mut nav, &mut ctx, UiEvent::Submit);
        assert_eq!(toast_messages(&mut nav), vec![MSG_NAME_EMPTY.to_string()]);
        assert_eq!(nav.top().title(), "Buat Pesanan"); // rejected, state unchanged

        dispatch(&mut nav, &mut ctx, UiEvent::Input("Alice".into()));
        dispatch(&mut nav, &mut ctx, UiEvent::Submit);
        assert_eq!(toast_messages(&mut nav), vec![MSG_NAME_TAKEN.to_string()]);
        assert_eq!(nav.top().title(), "Buat Pesanan");

        // A fresh name passes.
        dispatch(&mut nav, &mut ctx, UiEvent::Input("Bob".into()));
        dispatch(&mut nav, &mut ctx, UiEvent::Submit);
        assert_eq!(nav.top().title(), "Menu");
    }

    #[test]
    fn capacity_redirects_to_landing() {
        let mut ctx = test_ctx(1);
        let mut nav = navigator(&mut ctx);

        // Fill the single table.
        dispatch(&mut nav, &mut ctx, UiEvent::StartOrder);
        dispatch(&mut nav, &mut ctx, UiEvent::Input("Alice".into()));
        dispatch(&mut nav, &mut ctx, UiEvent::Submit);
        dispatch(&mut nav, &mut ctx, UiEvent::Submit);
        nav.take_toasts();

        // Next customer cannot be seated.
        dispatch(&mut nav, &mut ctx, UiEvent::StartOrder);
        dispatch(&mut nav, &mut ctx, UiEvent::Input("Bob".into()));
        dispatch(&mut nav, &mut ctx, UiEvent::Submit);

        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.top().title(), "Kafe Daun-Daun Pacilkom v2.0");
        assert_eq!(toast_messages(&mut nav), vec![MSG_TABLES_FULL.to_string()]);
    }

    #[test]
    fn checkout_flow_frees_the_table() {
        let mut ctx = test_ctx(2);
        let mut nav = navigator(&mut ctx);

        dispatch(&mut nav, &mut ctx, UiEvent::StartOrder);
        dispatch(&mut nav, &mut ctx, UiEvent::Input("Alice".into()));
        dispatch(&mut nav, &mut ctx, UiEvent::Submit);
        dispatch(&mut nav, &mut ctx, UiEvent::Submit);
        nav.take_toasts();
        let table = ctx.tables.booked()[0];

        dispatch(&mut nav, &mut ctx, UiEvent::StartCheckout);
        assert_eq!(nav.top().title(), "Pilih Meja");

        // Tapping an empty table only warns.
        let empty = ctx.tables.available()[0];
        dispatch(&mut nav, &mut ctx, UiEvent::ChooseTable(empty));
        assert_eq!(toast_messages(&mut nav), vec![MSG_TABLE_EMPTY.to_string()]);

        dispatch(&mut nav, &mut ctx, UiEvent::ChooseTable(table));
        let PageBody::Menu { mode, customer, .. } = nav.view(&ctx).body else {
            panic!("expected menu view");
        };
        assert_eq!(mode, PageMode::Checkout);
        assert_eq!(customer, "Alice");

        dispatch(&mut nav, &mut ctx, UiEvent::Submit);
        assert_eq!(nav.top().title(), "Pilih Meja"); // back after checkout
        assert_eq!(toast_messages(&mut nav), vec![MSG_CHECKED_OUT.to_string()]);
        assert!(ctx.tables.is_available(table));
        assert!(!ctx.tables.is_username_taken("Alice"));
    }

    #[test]
    fn change_table_updates_the_draft_order() {
        let mut ctx = test_ctx(3);
        let mut nav = navigator(&mut ctx);

        dispatch(&mut nav, &mut ctx, UiEvent::StartOrder);
        dispatch(&mut nav, &mut ctx, UiEvent::Input("Alice".into()));
        dispatch(&mut nav, &mut ctx, UiEvent::Submit);

        let PageBody::Menu { table, .. } = nav.view(&ctx).body else {
            panic!("expected menu view");
        };
        let provisional = table.unwrap();

        dispatch(&mut nav, &mut ctx, UiEvent::ChangeTable);
        assert_eq!(nav.top().title(), "Pilih Meja");

        let wanted = ctx
            .tables
            .available()
            .into_iter()
            .find(|&t| t != provisional)
            .unwrap();
        dispatch(&mut nav, &mut ctx, UiEvent::ChooseTable(wanted));
        dispatch(&mut nav, &mut ctx, UiEvent::Submit);

        let PageBody::Menu { table, .. } = nav.view(&ctx).body else {
            panic!("expected menu view");
        };
        assert_eq!(table, Some(wanted));

        dispatch(&mut nav, &mut ctx, UiEvent::Submit);
        nav.take_toasts();
        assert_eq!(ctx.tables.booked(), vec![wanted]);
    }

    #[test]
    fn invalid_quantity_text_warns_and_leaves_state() {
        let mut ctx = test_ctx(2);
        let mut nav = navigator(&mut ctx);

        dispatch(&mut nav, &mut ctx, UiEvent::StartOrder);
        dispatch(&mut nav, &mut ctx, UiEvent::Input("Alice".into()));
        dispatch(&mut nav, &mut ctx, UiEvent::Submit);
        dispatch(
            &mut nav,
            &mut ctx,
            UiEvent::SetQuantity {
                entry_id: "1".into(),
                input: "5".into(),
            },
        );

        dispatch(
            &mut nav,
            &mut ctx,
            UiEvent::SetQuantity {
                entry_id: "1".into(),
                input: "-2".into(),
            },
        );
        assert_eq!(toast_messages(&mut nav).len(), 1);

        let PageBody::Menu { rows, total, .. } = nav.view(&ctx).body else {
            panic!("expected menu view");
        };
        let row = rows.iter().find(|r| r.id == "1").unwrap();
        assert_eq!(row.quantity, 5);
        assert_eq!(total, 5 * 15_000);
    }

    #[test]
    fn category_filter_narrows_the_listing() {
        let mut ctx = test_ctx(2);
        let mut nav = navigator(&mut ctx);

        dispatch(&mut nav, &mut ctx, UiEvent::StartOrder);
        dispatch(&mut nav, &mut ctx, UiEvent::Input("Alice".into()));
        dispatch(&mut nav, &mut ctx, UiEvent::Submit);
        dispatch(
            &mut nav,
            &mut ctx,
            UiEvent::Filter(CategoryFilter::Only(Category::Drinks)),
        );

        let PageBody::Menu { rows, filter, .. } = nav.view(&ctx).body else {
            panic!("expected menu view");
        };
        assert_eq!(filter, CategoryFilter::Only(Category::Drinks));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "2");
        assert_eq!(rows[0].attribute_label, "Kemanisan");
    }

    #[test]
    fn seating_picker_rejects_occupied_tables() {
        let mut ctx = test_ctx(2);
        let mut nav = navigator(&mut ctx);

        dispatch(&mut nav, &mut ctx, UiEvent::StartOrder);
        dispatch(&mut nav, &mut ctx, UiEvent::Input("Alice".into()));
        dispatch(&mut nav, &mut ctx, UiEvent::Submit);
        dispatch(&mut nav, &mut ctx, UiEvent::Submit);
        nav.take_toasts();
        let taken = ctx.tables.booked()[0];

        dispatch(&mut nav, &mut ctx, UiEvent::StartOrder);
        dispatch(&mut nav, &mut ctx, UiEvent::Input("Bob".into()));
        dispatch(&mut nav, &mut ctx, UiEvent::Submit);
        dispatch(&mut nav, &mut ctx, UiEvent::ChangeTable);

        dispatch(&mut nav, &mut ctx, UiEvent::ChooseTable(taken));
        assert_eq!(toast_messages(&mut nav), vec![MSG_TABLE_OCCUPIED.to_string()]);

        let PageBody::Tables { selected, .. } = nav.view(&ctx).body else {
            panic!("expected tables view");
        };
        assert_ne!(selected, Some(taken));
    }
}
