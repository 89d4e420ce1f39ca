//! Plain-text output.

use kp_search::HoraryResolution;
use kp_vedic_base::{KpLords, SubDivision, SubDivisionTable, deg_to_dms, rashi_from_longitude};

fn lord_chain(l: &KpLords) -> String {
    format!(
        "{}/{}/{}/{}",
        l.sign_lord.abbreviation(),
        l.star_lord.abbreviation(),
        l.sub_lord.abbreviation(),
        l.sub_sub_lord.abbreviation()
    )
}

fn position(deg: f64) -> String {
    let info = rashi_from_longitude(deg);
    format!("{} {}", info.rashi.western_name(), info.dms)
}

pub fn division_line(d: &SubDivision) -> String {
    format!(
        "{:>3}  {:>10} - {:<10}  {:<8} {:<8} {:<8}",
        d.horary_number,
        deg_to_dms(d.start_deg).to_string(),
        deg_to_dms(d.end_deg).to_string(),
        d.sign_lord.english_name(),
        d.nakshatra_lord.english_name(),
        d.sub_lord.english_name(),
    )
}

pub fn print_table(table: &SubDivisionTable) {
    println!("{:>3}  {:>10}   {:<10}  {:<8} {:<8} {:<8}", "No", "From", "To", "Sign", "Star", "Sub");
    for d in table {
        println!("{}", division_line(d));
    }
}

pub fn print_lords(l: &KpLords) {
    println!("Longitude:  {:.6} deg ({})", l.longitude_deg, position(l.longitude_deg));
    println!("Nakshatra:  {} pada {}", l.nakshatra.name(), l.pada);
    println!("Sign lord:  {}", l.sign_lord);
    println!("Star lord:  {}", l.star_lord);
    println!("Sub lord:   {}", l.sub_lord);
    println!("Sub-sub:    {}", l.sub_sub_lord);
    println!("Horary no.: {}", l.horary_number);
}

pub fn print_resolution(r: &HoraryResolution) {
    let d = &r.division;
    let asc = &r.chart.ascendant;
    println!(
        "Horary {}: {} - {} ({} / {} / {})",
        r.horary_number,
        position(d.start_deg),
        position(d.end_deg),
        d.sign_lord,
        d.nakshatra_lord,
        d.sub_lord
    );
    println!(
        "Matched:   {}  (JD UT {:.6})",
        r.matched_time.format("%Y-%m-%d %H:%M:%S %:z"),
        r.search.jd_ut
    );
    println!(
        "Ascendant: {}  {} pada {}  {}",
        position(asc.longitude_deg),
        asc.nakshatra.name(),
        asc.pada,
        lord_chain(asc)
    );
    println!(
        "Search:    {}, residual {:.6} deg, {} iterations, {} evaluations",
        if r.search.converged { "converged" } else { "NOT converged" },
        r.search.residual_deg,
        r.search.iterations_used,
        r.search.evaluations
    );
    if !r.sub_lord_verified {
        println!("Warning:   chart ascendant lies outside the requested division");
    }

    println!();
    println!("{} houses ({})", r.chart.bhava_system, r.chart.ayanamsha);
    for h in &r.chart.houses {
        println!(
            "  {:>2}  {:<24} {}",
            h.number,
            position(h.cusp_deg),
            lord_chain(&h.lords)
        );
    }

    println!();
    println!("Planets");
    for p in &r.chart.planets {
        println!(
            "  {:<8} {:<24} {:<2} H{:<2}  {}",
            p.graha.english_name(),
            position(p.longitude_deg),
            if p.retrograde { "R" } else { "" },
            p.house,
            lord_chain(&p.lords)
        );
    }
}
