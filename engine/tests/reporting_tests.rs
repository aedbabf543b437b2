//! Aggregation report tests
//!
//! Covers:
//! - Production summary and shipping manifest labels
//! - Material procurement (Aloe scenario)
//! - Profit & loss with recurring and one-time general costs
//! - External sales and product margins

mod common;

use common::*;
use costing_engine::{
    Catalog, CatalogData, Directory, DirectoryData, EngineConfig, ReportingService, SalesFilter,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{Order, Patient, ReportingPeriod, Salesperson};

struct Fixture {
    shop: AloeShop,
    catalog: Catalog,
    directory: Directory,
    config: EngineConfig,
    giulia: Patient,
    marco: Salesperson,
}

impl Fixture {
    fn new() -> Self {
        let shop = aloe_shop();
        let catalog = Catalog::new(CatalogData {
            raw_materials: vec![shop.aloe.clone()],
            products: vec![shop.juice.clone()],
            modifier_groups: vec![shop.size.clone()],
            recipes: shop.recipes.clone(),
        })
        .unwrap();
        let giulia = patient("Giulia", "Verdi", "Via Test 10", "Bari");
        let marco = salesperson("Marco Rossi");
        let directory = Directory::new(DirectoryData {
            patients: vec![giulia.clone()],
            salespersons: vec![marco.clone()],
        });

        Self {
            shop,
            catalog,
            directory,
            config: EngineConfig::default(),
            giulia,
            marco,
        }
    }

    fn reports(&self) -> ReportingService<'_> {
        ReportingService::new(&self.catalog, &self.directory, &self.config)
    }

    /// External shipping order: one Small and one Big juice
    fn aloe_order(&self) -> Order {
        let mut order = order(
            date(2025, 3, 14),
            vec![
                item_with(&self.shop.juice, 1, &[(&self.shop.size, "Small")]),
                item_with(&self.shop.juice, 1, &[(&self.shop.size, "Big")]),
            ],
        );
        order.patient_id = self.giulia.id;
        order.is_external = true;
        order.is_shipping = true;
        order.salesperson_id = Some(self.marco.id);
        order.commission = dec("16.00");
        order
    }
}

fn march() -> Option<ReportingPeriod> {
    ReportingPeriod::month(2025, 3)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_production_summary() {
        let f = Fixture::new();
        let internal = order(date(2025, 3, 20), vec![item(&f.shop.juice, 3)]);
        let april = order(date(2025, 4, 1), vec![item(&f.shop.juice, 9)]);
        let orders = vec![f.aloe_order(), internal, april];

        let summary = f.reports().production_summary(&orders, march());

        assert_eq!(summary.products.len(), 1);
        let line = &summary.products[0];
        assert_eq!(line.product_name, "Succo Aloe");
        assert_eq!(line.total_quantity, 5);
        assert_eq!(line.breakdown.len(), 3);
        assert_eq!(line.breakdown[0].patient_name, "Giulia Verdi");
        assert_eq!(line.breakdown[0].seller, "Marco Rossi");
        assert_eq!(line.breakdown[0].variants[0].to_string(), "Formato: Small");
        assert_eq!(line.breakdown[2].seller, "Interno");
        assert_eq!(line.breakdown[2].patient_name, "Sconosciuto");
        assert!(line.breakdown[2].variants.is_empty());
    }

    #[test]
    fn test_production_summary_keeps_deleted_products() {
        let f = Fixture::new();
        let ghost = product("Vecchio Gel", "10", "1", "0", "0");
        let orders = vec![order(date(2025, 3, 2), vec![item(&ghost, 2), item(&f.shop.juice, 1)])];

        let summary = f.reports().production_summary(&orders, march());

        let names: Vec<&str> = summary
            .products
            .iter()
            .map(|line| line.product_name.as_str())
            .collect();
        assert_eq!(names, vec!["Sconosciuto", "Succo Aloe"]);
        assert_eq!(summary.total_quantity, 3);
    }

    #[test]
    fn test_production_summary_sorts_case_insensitively() {
        let f = Fixture::new();
        let gel = product("aloe gel", "10", "1", "0", "0");
        let ginger = product("Zenzero", "10", "1", "0", "0");
        let cream = product("Crema", "10", "1", "0", "0");
        let catalog = Catalog::new(CatalogData {
            products: vec![gel.clone(), ginger.clone(), cream.clone()],
            ..Default::default()
        })
        .unwrap();
        let reports = ReportingService::new(&catalog, &f.directory, &f.config);
        let orders = vec![order(
            date(2025, 3, 2),
            vec![item(&ginger, 1), item(&gel, 1), item(&cream, 1)],
        )];

        let summary = reports.production_summary(&orders, march());

        let names: Vec<&str> = summary
            .products
            .iter()
            .map(|line| line.product_name.as_str())
            .collect();
        assert_eq!(names, vec!["aloe gel", "Crema", "Zenzero"]);
    }

    #[test]
    fn test_shipping_manifest() {
        let f = Fixture::new();
        let pickup = order(date(2025, 3, 3), vec![item(&f.shop.juice, 1)]);
        let mut unknown_patient = order(date(2025, 3, 4), vec![item(&f.shop.juice, 4)]);
        unknown_patient.is_shipping = true;
        unknown_patient.is_external = true;
        let orders = vec![f.aloe_order(), pickup, unknown_patient];

        let manifest = f.reports().shipping_manifest(&orders, march());

        assert_eq!(manifest.shipments.len(), 2);
        let first = &manifest.shipments[0];
        assert_eq!(first.destination, "Via Test 10, Bari");
        assert_eq!(first.total_items, 2);
        assert_eq!(first.items[1].variants[0].option, "Big");
        assert_eq!(manifest.shipments[1].destination, "N/A");
        assert_eq!(manifest.shipments[1].seller, "Esterno");
        assert_eq!(manifest.total_items, 6);
    }

    #[test]
    fn test_aloe_procurement() {
        let f = Fixture::new();
        let report = f.reports().material_procurement(&[f.aloe_order()], march());

        assert_eq!(report.materials.len(), 1);
        let aloe = &report.materials[0];
        assert_eq!(aloe.name, "Aloe");
        assert_eq!(aloe.unit, "ml");
        assert_eq!(aloe.quantity, dec("700"));
        assert_eq!(aloe.cost, dec("14.00"));
        assert!(aloe.is_raw_material);
        assert_eq!(report.total_cost, dec("14.00"));
    }

    #[test]
    fn test_procurement_matches_option_with_trailing_space() {
        let f = Fixture::new();
        let size = group("Formato", &["Small "]);
        let mut juice = product("Succo", "40", "0", "0", "0");
        juice.modifier_group_ids = vec![size.id];
        let catalog = Catalog::new(CatalogData {
            raw_materials: vec![f.shop.aloe.clone()],
            products: vec![juice.clone()],
            modifier_groups: vec![size.clone()],
            recipes: vec![variant_recipe(&size, "Small ", vec![linked_line(&f.shop.aloe, "50", "ml", "0")])],
        })
        .unwrap();
        let reports = ReportingService::new(&catalog, &f.directory, &f.config);
        let orders = vec![order(date(2025, 3, 1), vec![item_with(&juice, 1, &[(&size, "Small ")])])];

        let report = reports.material_procurement(&orders, march());

        assert_eq!(report.materials.len(), 1);
        assert_eq!(report.materials[0].quantity, dec("50"));
        assert_eq!(report.materials[0].cost, dec("1.00"));
    }

    #[test]
    fn test_procurement_groups_by_name_and_unit() {
        let f = Fixture::new();
        let cream = product("Crema", "20", "5", "0", "0");
        let catalog = Catalog::new(CatalogData {
            products: vec![cream.clone()],
            recipes: vec![base_recipe(
                &cream,
                vec![
                    static_line("Aloe", "0.1", "l", "2"),
                    static_line("Aloe", "50", "ml", "0.01"),
                    static_line("Aloe", "50", "ml", "0.01"),
                ],
            )],
            ..Default::default()
        })
        .unwrap();
        let reports = ReportingService::new(&catalog, &f.directory, &f.config);

        let report = reports.material_procurement(&[order(date(2025, 3, 1), vec![item(&cream, 2)])], None);

        assert_eq!(report.materials.len(), 2);
        assert_eq!(report.materials[0].unit, "l");
        assert_eq!(report.materials[0].quantity, dec("0.2"));
        assert_eq!(report.materials[1].unit, "ml");
        assert_eq!(report.materials[1].quantity, dec("200"));
        assert_eq!(report.materials[1].cost, dec("2.00"));
        assert!(!report.materials[1].is_raw_material);
    }

    #[test]
    fn test_profit_and_loss() {
        let f = Fixture::new();
        let costs = vec![
            general_cost("Affitto", "500", date(2024, 1, 1), true),
            general_cost("Fiera", "100", date(2025, 3, 10), false),
            general_cost("Stampa", "40", date(2025, 2, 10), false),
        ];

        let pnl = f.reports().profit_and_loss(&[f.aloe_order()], &costs, march());

        assert_eq!(pnl.gross_revenue, dec("80"));
        assert_eq!(pnl.materials_cost, dec("14.00"));
        assert_eq!(pnl.labour_cost, dec("10"));
        assert_eq!(pnl.commissions, dec("16.00"));
        assert_eq!(pnl.operating_profit, dec("40"));
        assert_eq!(pnl.general_costs, dec("600"));
        assert_eq!(pnl.net_profit, dec("-560"));
        assert_eq!(pnl.net_margin_percent, dec("-700"));
        assert_eq!(pnl.general_costs_by_category.len(), 2);
    }

    #[test]
    fn test_profit_and_loss_without_revenue() {
        let f = Fixture::new();
        let mut gift = f.aloe_order();
        gift.is_free = true;

        let pnl = f.reports().profit_and_loss(&[gift], &[], march());

        assert_eq!(pnl.gross_revenue, Decimal::ZERO);
        assert_eq!(pnl.materials_cost, dec("14.00"));
        assert_eq!(pnl.net_margin_percent, Decimal::ZERO);
    }

    #[test]
    fn test_profit_and_loss_all_time() {
        let f = Fixture::new();
        let costs = vec![
            general_cost("Fiera", "100", date(2025, 3, 10), false),
            general_cost("Stampa", "40", date(2024, 2, 10), false),
        ];
        let mut old = f.aloe_order();
        old.date = date(2023, 6, 1);

        let pnl = f.reports().profit_and_loss(&[f.aloe_order(), old], &costs, None);

        assert_eq!(pnl.order_count, 2);
        assert_eq!(pnl.general_costs, dec("140"));
    }

    #[test]
    fn test_external_sales() {
        let f = Fixture::new();
        let mut gift = f.aloe_order();
        gift.is_free = true;
        let mut orphan = f.aloe_order();
        orphan.salesperson_id = None;
        let internal = order(date(2025, 3, 5), vec![item(&f.shop.juice, 1)]);
        let orders = vec![f.aloe_order(), gift, orphan, internal];

        let all = f.reports().external_sales(&orders, SalesFilter::default());
        assert_eq!(all.sales.len(), 3);
        assert_eq!(all.total_sales, dec("160"));
        assert_eq!(all.total_commissions, dec("48"));
        assert_eq!(all.net_retention, dec("112"));
        assert_eq!(all.sales[2].salesperson, "Agente Sconosciuto");

        let marco = f.reports().external_sales(
            &orders,
            SalesFilter {
                salesperson_id: Some(f.marco.id),
                period: march(),
            },
        );
        assert_eq!(marco.sales.len(), 2);
        assert!(marco.sales[1].is_free);
        assert_eq!(marco.sales[1].sale_value, Decimal::ZERO);
    }

    #[test]
    fn test_snapshots_and_reports_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();
        assert_send_sync::<Directory>();
        assert_send_sync::<ReportingService<'static>>();
        assert_send_sync::<costing_engine::ProfitAndLoss>();
        assert_send_sync::<costing_engine::ProductionSummary>();
        assert_send_sync::<costing_engine::ProcurementReport>();
    }

    #[test]
    fn test_product_margins() {
        let f = Fixture::new();
        let margins = f.reports().product_margins();

        assert_eq!(margins.len(), 1);
        let juice = &margins[0];
        assert_eq!(juice.internal_cost, dec("5"));
        assert_eq!(juice.external_cost, dec("13"));
        assert_eq!(juice.internal_profit, dec("35"));
        assert_eq!(juice.external_profit, dec("27"));
        // Only variant recipes, no base recipe to compare with
        assert_eq!(juice.recipe_cost, None);
        assert!(!juice.cost_drift);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Recurring costs hit every month, one-time costs only their own
    #[test]
    fn prop_recurring_cost_inclusion(
        cost_month in 1u32..=12,
        report_month in 1u32..=12,
        is_recurring in any::<bool>(),
    ) {
        let f = Fixture::new();
        let costs = vec![general_cost("Utenze", "75", date(2025, cost_month, 15), is_recurring)];
        let period = ReportingPeriod::month(2025, report_month);

        let pnl = f.reports().profit_and_loss(&[], &costs, period);

        let expected = if is_recurring || cost_month == report_month {
            dec("75")
        } else {
            Decimal::ZERO
        };
        prop_assert_eq!(pnl.general_costs, expected);
    }

    /// Production totals equal the units ordered in the period
    #[test]
    fn prop_production_totals_match_orders(quantities in prop::collection::vec(0u32..20, 0..8)) {
        let f = Fixture::new();
        let orders: Vec<Order> = quantities
            .iter()
            .map(|q| order(date(2025, 3, 10), vec![item_with(&f.shop.juice, *q, &[(&f.shop.size, "Small")])]))
            .collect();

        let summary = f.reports().production_summary(&orders, march());
        let expected: u64 = quantities.iter().map(|q| u64::from(*q)).sum();
        prop_assert_eq!(summary.total_quantity, expected);

        let procurement = f.reports().material_procurement(&orders, march());
        let aloe: Decimal = procurement.materials.iter().map(|m| m.quantity).sum();
        prop_assert_eq!(aloe, dec("200") * Decimal::from(expected));
    }
}
