//! Static cluster reference table: segment descriptions and recommendations

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, ContentArrangement, Table};
use console::style;

use crate::pipeline::ClusterId;

/// Business description of one customer segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterProfile {
    pub id: ClusterId,
    pub description: &'static str,
    pub recommendation: &'static str,
}

pub static CLUSTER_PROFILES: [ClusterProfile; 4] = [
    ClusterProfile {
        id: 0,
        description: "Mixed monetary with notable cash focused traits, moderate spenders, \
            blended habits. Includes subscription payers and occasional shoppers. Low to \
            moderate engagement users and not necessarily loyalty-driven or retail dependent. \
            Less risky group with good payment behaviour.",
        recommendation: "Cash perks, loyalty rewards, light engagement promos",
    },
    ClusterProfile {
        id: 1,
        description: "Understimulated retail dominant cluster but still behaviourally diverse \
            (also use cash). Some users might be shifting from cash heavy usage to structured \
            spending or vice versa. Less consistent repayment patterns. Occasional or seasonal \
            engagement rather than loyalty-based spending. Possibly a mix of dormant users, \
            seasonal spenders, and committed ones.",
        recommendation: "Depending on the purchase style and monetary style. If installments \
            dominant and retail focused then merchant targeting. If oneoff dominant and \
            mixed/retail focused then seasonal, gamified, or triggered promos. Lastly, if \
            balanced style and cash focused, then cash perks.",
    },
    ClusterProfile {
        id: 2,
        description: "Extremely retail-focused group which means they are a purchase-centric \
            group. They are comfortable with structured borrowing and payback cycles. Loyal \
            credit card shoppers.",
        recommendation: "Merchant partnerships, installment programs, or product bundling. \
            Furthermore, for installment dominant users, use tiered loyalty offers based on \
            credit engagement; oneoff dominant users, use cashback campaigns and flash \
            discounts; and balanced users, use flexible promos like A/B offers.",
    },
    ClusterProfile {
        id: 3,
        description: "Cash-centric user group. Low interaction with credit purchases and high \
            preference for liquidity. Prioritise control, quick cash access, and avoid \
            long-term financing. Which could be driven by income volatility/cashflow \
            constraints, limited trust or interest in installment products, short term \
            financial needs over long term planning. Low repayment habits with high \
            utilization. Potential churn if not supported well -> Risky users.",
        recommendation: "For high risk sub-segment, use fee relief, budgeting nudges, and \
            repayment incentives. For low to moderate risk, use cash perks, loyalty rewards, \
            and light engagement promos.",
    },
];

/// Profile for an exact cluster id, if one is defined.
pub fn profile_for(id: ClusterId) -> Option<&'static ClusterProfile> {
    CLUSTER_PROFILES.iter().find(|p| p.id == id)
}

/// Render the reference table, optionally highlighting one cluster.
pub fn cluster_table(highlight: Option<ClusterId>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(110);
    table.set_header(vec![
        Cell::new("Cluster").add_attribute(Attribute::Bold),
        Cell::new("Description").add_attribute(Attribute::Bold),
        Cell::new("Recommendation").add_attribute(Attribute::Bold),
    ]);

    for profile in &CLUSTER_PROFILES {
        let mut id_cell = Cell::new(profile.id);
        if highlight == Some(profile.id) {
            id_cell = id_cell.fg(Color::Green).add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            id_cell,
            Cell::new(profile.description),
            Cell::new(profile.recommendation),
        ]);
    }

    table
}

/// Print the cluster summary table
pub fn display_cluster_profiles(highlight: Option<ClusterId>) {
    println!();
    println!(
        "    {} {}",
        style("🧾").cyan(),
        style("CLUSTER SUMMARY").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    for line in cluster_table(highlight).to_string().lines() {
        println!("    {}", line);
    }

    if let Some(id) = highlight {
        if profile_for(id).is_none() {
            println!();
            println!(
                "    {} Cluster {} has no reference profile",
                style("!").yellow().bold(),
                id
            );
        }
    }
}
