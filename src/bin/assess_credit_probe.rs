use anyhow::Result;
use empowr_svc::assessment::client::ASSESS_CREDIT_PATH;
use empowr_svc::assessment::{
    AssessmentDraft, AssessmentResult, DraftField, build_request, interpret,
};

/// Sample applicant used when probing a scoring service
fn sample_draft() -> AssessmentDraft {
    let mut draft = AssessmentDraft::default();
    for (field, value) in [
        (DraftField::BusinessName, "Maria's Bakery"),
        (DraftField::Industry, "Food Service"),
        (DraftField::AnnualRevenue, "250000"),
        (DraftField::YearsInBusiness, "3"),
        (DraftField::EmployeeCount, "5"),
        (DraftField::CreditScore, "650"),
        (DraftField::MonthlyExpenses, "15000"),
        (DraftField::Location, "Phoenix, AZ"),
        (DraftField::BusinessType, "llc"),
        (DraftField::LoanAmount, "50000"),
        (DraftField::Email, "m@x.com"),
    ] {
        draft.update_field(field, value);
    }
    draft
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("🚀 Credit Assessment Probe");
    println!("{}", "=".repeat(50));

    let base_url = std::env::var("SCORING_SERVICE_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
    let url = format!("{}{}", base_url.trim_end_matches('/'), ASSESS_CREDIT_PATH);

    let request = build_request(&sample_draft());
    println!("📤 POST {}", url);
    println!("{}", serde_json::to_string_pretty(&request)?);

    // Raw client on purpose: the probe shows exactly what came back
    let client = reqwest::Client::new();
    let response = match client.post(&url).json(&request).send().await {
        Ok(response) => response,
        Err(error) => {
            println!("❌ Transport failure: {}", error);
            println!("💡 Hint: is the scoring service running at {}?", base_url);
            return Ok(());
        }
    };

    let status = response.status();
    println!("Response Status: {}", status);

    let body = response.text().await?;
    println!("\n📄 Raw Response Content:");
    println!("{}", "─".repeat(60));
    println!("{}", body);
    println!("{}", "─".repeat(60));

    if !status.is_success() {
        println!("❌ Non-success status, the service would report an assessment failure");
        return Ok(());
    }

    match serde_json::from_str::<AssessmentResult>(&body) {
        Ok(result) => {
            let view = interpret(&result);
            let summary = view.summary();
            println!("✅ {}", summary.headline);
            println!("📊 Empowr Score: {}", view.empowr_score);
            println!("💵 {}: ${}", summary.amount_label, view.amount);
            println!("📈 Est. Interest Rate: {}%", view.interest_rate);
            println!("⚖️  {}", summary.risk_label);
            if let Some(message) = &view.message {
                println!("📝 {}", message);
            }
        }
        Err(error) => {
            println!("❌ Body is not a usable assessment result: {}", error);
        }
    }

    println!("\n{}", "=".repeat(50));
    println!("🏁 Probe completed!");

    Ok(())
}
