use crate::engine::{CalculationSummary, Recommendation};
use crate::models::DataWarning;
use crate::shopping::{ShoppingList, UnitLabels};

/// Display aggregated demand and, when enabled, the sales figures.
pub fn display_summary(name: &str, summary: &CalculationSummary, labels: &dyn UnitLabels) {
    println!();
    println!("=== {} ===", name);
    println!();

    if summary.ingredients.is_empty() && summary.garnishes.is_empty() {
        println!("Nothing planned yet.");
        println!();
        return;
    }

    let name_width = summary
        .ingredients
        .iter()
        .map(|e| e.ingredient_name.len())
        .chain(summary.garnishes.iter().map(|g| g.garnish_name.len()))
        .max()
        .unwrap_or(10);

    println!("--- Ingredients ---");
    for entry in &summary.ingredients {
        let unit = entry.unit.as_ref().map(|u| labels.label(u)).unwrap_or_default();
        println!(
            "  {:<width$}  {:>10.2} {}",
            entry.ingredient_name,
            entry.amount,
            unit,
            width = name_width
        );
    }

    if !summary.garnishes.is_empty() {
        println!();
        println!("--- Garnishes ---");
        for garnish in &summary.garnishes {
            println!(
                "  {:<width$}  {:>10}",
                garnish.garnish_name,
                garnish.amount,
                width = name_width
            );
        }
    }

    if let Some(fin) = &summary.financials {
        println!();
        println!("--- Sales ---");
        for item in &fin.items {
            println!(
                "  {:>4} x {:<20} cost {:>8.2} | revenue {:>8.2} | profit {:>8.2}",
                item.planned_amount, item.cocktail_name, item.cost, item.revenue, item.profit
            );
        }
        println!();
        println!("Total cost:    {:.2}", fin.total_cost);
        println!("Total revenue: {:.2}", fin.total_revenue);
        println!("Total profit:  {:.2}", fin.total_profit);
    }

    display_warnings(&summary.warnings);
    println!();
}

/// Display the shopping list as a table.
pub fn display_shopping_list(list: &ShoppingList, labels: &dyn UnitLabels) {
    if list.is_empty() {
        println!("Shopping list is empty.");
        return;
    }

    println!();
    println!("=== Shopping List ===");
    println!();

    let name_width = list
        .rows
        .iter()
        .map(|r| r.ingredient_name.len())
        .max()
        .unwrap_or(10);

    for row in &list.rows {
        let mark = if row.checked { "[x]" } else { "[ ]" };
        let raw = row
            .raw_amounts
            .iter()
            .map(|r| {
                let unit = r.unit.as_ref().map(|u| labels.label(u)).unwrap_or_default();
                format!("{:.2} {}", r.amount, unit)
            })
            .collect::<Vec<_>>()
            .join(" + ");

        match (&row.output_unit, row.total, row.units_to_buy) {
            (Some(out), Some(total), Some(buy)) => println!(
                "{} {:<width$}  {:>8.2} {:<10} buy {:>3}   ({})",
                mark,
                row.ingredient_name,
                total,
                labels.label(&out.unit),
                buy,
                raw,
                width = name_width
            ),
            _ => println!(
                "{} {:<width$}  select a unit   ({})",
                mark,
                row.ingredient_name,
                raw,
                width = name_width
            ),
        }
    }

    display_warnings(&list.warnings);
    println!();
}

/// Display bottle recommendations for one cocktail.
pub fn display_recommendations(
    cocktail_name: &str,
    recommendations: &[Recommendation],
    labels: &dyn UnitLabels,
) {
    println!();
    println!("=== Recommendations for {} ===", cocktail_name);
    println!();

    if recommendations.is_empty() {
        println!("No recommendations (select shopping units for its ingredients first).");
        println!();
        return;
    }

    for rec in recommendations {
        println!(
            "  {:<20} {:>6.2} of {} {} | more {:+} | less {:+}",
            rec.ingredient_name,
            rec.total_needed_amount,
            rec.total_needed_units,
            labels.label(&rec.output_unit),
            rec.more,
            rec.less
        );
    }
    println!();
}

/// Display data warnings, if any.
pub fn display_warnings(warnings: &[DataWarning]) {
    if warnings.is_empty() {
        return;
    }

    println!();
    println!("--- Incomplete data ({}) ---", warnings.len());
    for warning in warnings {
        println!("  ! {}", warning);
    }
}
