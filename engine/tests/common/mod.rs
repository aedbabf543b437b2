//! Fixture builders shared by the integration tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use shared::{
    GeneralCost, IngredientLine, ModifierGroup, Order, OrderItem, OrderStatus, Patient, Product,
    RawMaterial, Recipe, RecipeTarget, Salesperson,
};

// Helper to create Decimal from string
pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn raw_material(name: &str, unit: &str, quantity: &str, price: &str) -> RawMaterial {
    RawMaterial {
        id: Uuid::new_v4(),
        name: name.to_string(),
        unit: unit.to_string(),
        total_quantity: dec(quantity),
        total_price: dec(price),
    }
}

pub fn static_line(name: &str, quantity: &str, unit: &str, cost_per_unit: &str) -> IngredientLine {
    IngredientLine {
        name: name.to_string(),
        quantity: dec(quantity),
        unit: unit.to_string(),
        cost_per_unit: dec(cost_per_unit),
        raw_material_id: None,
    }
}

pub fn linked_line(material: &RawMaterial, quantity: &str, unit: &str, cost_per_unit: &str) -> IngredientLine {
    IngredientLine {
        raw_material_id: Some(material.id),
        ..static_line(&material.name, quantity, unit, cost_per_unit)
    }
}

pub fn group(name: &str, options: &[&str]) -> ModifierGroup {
    ModifierGroup {
        id: Uuid::new_v4(),
        name: name.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
    }
}

pub fn product(name: &str, price: &str, cost_per_item: &str, labour: &str, commission: &str) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        sku: None,
        variant_skus: BTreeMap::new(),
        price: dec(price),
        cost_per_item: dec(cost_per_item),
        labour_cost: dec(labour),
        external_commission: dec(commission),
        modifier_group_ids: vec![],
    }
}

pub fn base_recipe(product: &Product, ingredients: Vec<IngredientLine>) -> Recipe {
    Recipe {
        id: Uuid::new_v4(),
        target: RecipeTarget::Product {
            product_id: product.id,
        },
        ingredients,
    }
}

pub fn variant_recipe(group: &ModifierGroup, option: &str, ingredients: Vec<IngredientLine>) -> Recipe {
    Recipe {
        id: Uuid::new_v4(),
        target: RecipeTarget::Variant {
            modifier_group_id: group.id,
            modifier_option: option.to_string(),
        },
        ingredients,
    }
}

pub fn item(product: &Product, quantity: u32) -> OrderItem {
    OrderItem {
        product_id: product.id,
        quantity,
        selected_modifiers: BTreeMap::new(),
    }
}

pub fn item_with(product: &Product, quantity: u32, selections: &[(&ModifierGroup, &str)]) -> OrderItem {
    OrderItem {
        selected_modifiers: selections
            .iter()
            .map(|(group, option)| (group.id, option.to_string()))
            .collect(),
        ..item(product, quantity)
    }
}

pub fn order(date: NaiveDate, items: Vec<OrderItem>) -> Order {
    Order {
        id: Uuid::new_v4(),
        patient_id: Uuid::new_v4(),
        date,
        items,
        is_external: false,
        is_shipping: false,
        is_free: false,
        commission: Decimal::ZERO,
        salesperson_id: None,
        status: OrderStatus::Pending,
    }
}

pub fn patient(first: &str, last: &str, address: &str, city: &str) -> Patient {
    Patient {
        id: Uuid::new_v4(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        address: address.to_string(),
        city: city.to_string(),
    }
}

pub fn salesperson(name: &str) -> Salesperson {
    Salesperson {
        id: Uuid::new_v4(),
        name: name.to_string(),
    }
}

pub fn general_cost(name: &str, amount: &str, date: NaiveDate, is_recurring: bool) -> GeneralCost {
    GeneralCost {
        id: Uuid::new_v4(),
        name: name.to_string(),
        amount: dec(amount),
        category: name.to_string(),
        date,
        is_recurring,
    }
}

/// Aloe juice sold in Small (200 ml) and Big (500 ml), aloe at €0.02/ml
///
/// No base recipe and no stored cost, so the variant recipes carry all of it
pub struct AloeShop {
    pub aloe: RawMaterial,
    pub size: ModifierGroup,
    pub juice: Product,
    pub recipes: Vec<Recipe>,
}

pub fn aloe_shop() -> AloeShop {
    let aloe = raw_material("Aloe", "ml", "5000", "100");
    let size = group("Formato", &["Small", "Big"]);
    let mut juice = product("Succo Aloe", "40", "0", "5", "8");
    juice.modifier_group_ids = vec![size.id];
    let recipes = vec![
        variant_recipe(&size, "Small", vec![linked_line(&aloe, "200", "ml", "0.02")]),
        variant_recipe(&size, "Big", vec![linked_line(&aloe, "500", "ml", "0.02")]),
    ];

    AloeShop {
        aloe,
        size,
        juice,
        recipes,
    }
}
