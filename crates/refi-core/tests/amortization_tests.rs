use refi_core::amortization::{
    compute_monthly_payment, project_year_one, simulate_year_one, year_one_schedule,
    LoanParameters,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{}: expected ~{}, got {} (diff = {})",
        msg,
        expected,
        actual,
        diff
    );
}

/// Run the fixed payment over every month of the tenure.
fn balance_after_full_term(loan: &LoanParameters, payment: Decimal) -> Decimal {
    let rate = loan.monthly_rate();
    let months = (loan.tenure_years * dec!(12)).trunc();
    let mut balance = loan.principal;
    let mut month = Decimal::ZERO;
    while month < months {
        balance -= payment - balance * rate;
        month += Decimal::ONE;
    }
    balance
}

// ===========================================================================
// Monthly payment
// ===========================================================================

#[test]
fn test_payment_positive_and_covers_principal() {
    for principal in [dec!(50_000), dec!(300_000), dec!(1_500_000)] {
        for rate in [dec!(0.1), dec!(2.5), dec!(4), dec!(10)] {
            for tenure in [dec!(1), dec!(5), dec!(25), dec!(35)] {
                let pmt = compute_monthly_payment(principal, rate, tenure);
                assert!(pmt > Decimal::ZERO, "payment for {principal}/{rate}/{tenure}");
                let total = pmt * tenure * dec!(12);
                assert!(
                    total >= principal,
                    "total {total} < principal {principal} for {rate}%/{tenure}y"
                );
            }
        }
    }
}

#[test]
fn test_payment_amortises_over_full_term() {
    for (p, r, t) in [
        (dec!(300_000), dec!(4), dec!(25)),
        (dec!(500_000), dec!(4), dec!(20)),
        (dec!(120_000), dec!(0.1), dec!(5)),
        (dec!(900_000), dec!(9.5), dec!(35)),
    ] {
        let loan = LoanParameters::new(p, r, t);
        let pmt = compute_monthly_payment(p, r, t);
        let residual = balance_after_full_term(&loan, pmt);
        assert_close(residual, Decimal::ZERO, dec!(0.001), "residual after full term");
    }
}

#[test]
fn test_zero_rate_boundary() {
    assert_eq!(
        compute_monthly_payment(dec!(120000), dec!(0), dec!(10)),
        dec!(1000)
    );
}

#[test]
fn test_known_reference_payment() {
    // Monthly rate 0.003333..., 240 months.
    let pmt = compute_monthly_payment(dec!(500000), dec!(4), dec!(20));
    assert_close(pmt, dec!(3029.90), dec!(0.05), "500k @ 4% / 20y");
}

#[test]
fn test_higher_rate_higher_payment() {
    let low = compute_monthly_payment(dec!(400000), dec!(2), dec!(25));
    let high = compute_monthly_payment(dec!(400000), dec!(5), dec!(25));
    assert!(high > low);
}

#[test]
fn test_longer_tenure_lower_payment() {
    let short = compute_monthly_payment(dec!(400000), dec!(3), dec!(15));
    let long = compute_monthly_payment(dec!(400000), dec!(3), dec!(30));
    assert!(long < short);
}

// ===========================================================================
// Year-one simulation
// ===========================================================================

#[test]
fn test_year_one_balance_below_principal() {
    let loan = LoanParameters::new(dec!(300000), dec!(4), dec!(25));
    let result = project_year_one(&loan);
    assert!(result.balance_after_year_one < loan.principal);
    // Roughly 11.87k of interest in year one at 4% on a declining 300k.
    assert_close(
        result.interest_paid_year_one,
        dec!(11_870.19),
        dec!(0.01),
        "year-one interest",
    );
}

#[test]
fn test_underpayment_grows_balance_monotonically() {
    let loan = LoanParameters::new(dec!(200000), dec!(5), dec!(30));
    // First-month interest is ~833.33.
    let sim = simulate_year_one(
        loan.principal,
        loan.annual_rate_percent,
        loan.tenure_years,
        dec!(500),
    );
    assert!(sim.balance_after_year_one > loan.principal);

    // Interest-only payment leaves the balance untouched.
    let interest_only = loan.first_month_interest();
    let flat = simulate_year_one(
        loan.principal,
        loan.annual_rate_percent,
        loan.tenure_years,
        interest_only,
    );
    assert_close(
        flat.balance_after_year_one,
        loan.principal,
        dec!(0.000001),
        "interest-only balance",
    );
    assert_close(
        flat.interest_paid_year_one,
        interest_only * dec!(12),
        dec!(0.000001),
        "interest-only interest",
    );
}

#[test]
fn test_tenure_argument_does_not_change_simulation() {
    let a = simulate_year_one(dec!(300000), dec!(4), dec!(10), dec!(2000));
    let b = simulate_year_one(dec!(300000), dec!(4), dec!(30), dec!(2000));
    assert_eq!(a, b);
}

#[test]
fn test_schedule_rows_reconcile() {
    let loan = LoanParameters::new(dec!(750000), dec!(3.5), dec!(30));
    let result = project_year_one(&loan);
    let rows = year_one_schedule(&loan);

    assert_eq!(rows.len(), 12);
    for row in &rows {
        assert_close(
            row.interest_portion + row.principal_portion,
            result.monthly_payment,
            dec!(0.000000001),
            "interest + principal = payment",
        );
        assert_close(
            row.closing_balance,
            row.opening_balance - row.principal_portion,
            dec!(0.000000001),
            "closing balance",
        );
    }
    // Principal share rises each month on an amortising loan.
    for pair in rows.windows(2) {
        assert!(pair[1].principal_portion > pair[0].principal_portion);
    }
}

#[test]
fn test_repeated_invocation_is_identical() {
    let first = compute_monthly_payment(dec!(612345.67), dec!(3.21), dec!(23));
    let second = compute_monthly_payment(dec!(612345.67), dec!(3.21), dec!(23));
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());

    let s1 = simulate_year_one(dec!(612345.67), dec!(3.21), dec!(23), first);
    let s2 = simulate_year_one(dec!(612345.67), dec!(3.21), dec!(23), second);
    assert_eq!(s1, s2);
}
