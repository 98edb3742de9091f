use super::*;
use crate::report::fixtures::sample_report;

#[test]
fn test_html_colors_and_escaping() {
    let html = render_report_html(&sample_report());
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h2>Law School</h2>"));
    assert!(html.contains("<title>Ethics &amp; Law</title>"));
    assert!(html.contains("<h4>CD1 &lt;Reasoning&gt;</h4>"));
    assert!(html.contains("background-color: #4CAF50; color: white;\">Exceeds domain"));
    assert!(html.contains("background-color: #FFC107; color: black;\">Meets domain"));
    assert!(html.contains("background-color: #FF9800; color: black;\">Approaching domain"));
    assert!(html.contains("background-color: #F44336; color: white;\">Well below domain"));
    assert_eq!(html.matches("<table>").count(), 2);
}
