// Payment methods and sales channels
use super::keys::MethodName;
use super::{group_by, sort_desc_by};
use shared::models::PaymentRecord;
use shared::views::{ChannelShare, PaymentShare};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaymentBreakdown {
    pub shares: Vec<PaymentShare>,
    /// Sum of the signed shares.
    pub net_total: f64,
}

/// True when `method` reduces what was actually received (gift cards, vouchers).
pub fn is_negative_method(method: &str, negative_methods: &[String]) -> bool {
    let method = method.to_lowercase();
    negative_methods
        .iter()
        .any(|neg| method.contains(&neg.to_lowercase()))
}

/// Sums per method, flips negative methods below zero whatever the sheet
/// says, and sorts by signed value, largest first.
pub fn payment_methods(records: &[PaymentRecord], negative_methods: &[String]) -> PaymentBreakdown {
    let mut shares: Vec<PaymentShare> = group_by(
        records,
        |r| MethodName(r.method.clone()),
        |acc: &mut f64, r| *acc += r.amount,
    )
    .into_entries()
    .into_iter()
    .map(|(method, total)| PaymentShare {
        value: if is_negative_method(method.as_str(), negative_methods) {
            -total.abs()
        } else {
            total
        },
        label: method.0,
    })
    .collect();
    sort_desc_by(&mut shares, |s| s.value);
    let net_total = shares.iter().map(|s| s.value).sum();
    PaymentBreakdown { shares, net_total }
}

/// Positive methods only, values rounded to whole currency units.
pub fn sales_channels(shares: &[PaymentShare]) -> Vec<ChannelShare> {
    shares
        .iter()
        .filter(|s| s.value > 0.0)
        .map(|s| ChannelShare {
            label: s.label.clone(),
            value: s.value.round(),
            delta: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CalendarDate;

    fn pay(method: &str, amount: f64) -> PaymentRecord {
        PaymentRecord {
            date: CalendarDate::new(1, 3, 2023),
            method: method.to_string(),
            amount,
        }
    }

    fn negatives() -> Vec<String> {
        vec!["vale presente".to_string()]
    }

    #[test]
    fn test_methods_grouped_and_sorted() {
        let breakdown = payment_methods(
            &[pay("Pix", 10.0), pay("Dinheiro", 30.0), pay("Pix", 25.0)],
            &negatives(),
        );
        let labels: Vec<&str> = breakdown.shares.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Pix", "Dinheiro"]);
        assert_eq!(breakdown.shares[0].value, 35.0);
        assert_eq!(breakdown.net_total, 65.0);
    }

    #[test]
    fn test_voucher_always_negative() {
        for amount in [50.0, -50.0] {
            let breakdown = payment_methods(&[pay("Pix", 100.0), pay("Vale Presente", amount)], &negatives());
            assert_eq!(breakdown.shares.last().unwrap().value, -50.0);
            assert_eq!(breakdown.net_total, 50.0);
        }
    }

    #[test]
    fn test_channels_skip_negative_and_round() {
        let breakdown = payment_methods(
            &[pay("Pix", 10.4), pay("Cartão", 20.6), pay("Vale Presente", 5.0)],
            &negatives(),
        );
        let channels = sales_channels(&breakdown.shares);
        assert_eq!(
            channels,
            vec![
                ChannelShare { label: "Cartão".to_string(), value: 21.0, delta: None },
                ChannelShare { label: "Pix".to_string(), value: 10.0, delta: None },
            ]
        );
    }

    #[test]
    fn test_empty_payments() {
        let breakdown = payment_methods(&[], &negatives());
        assert!(breakdown.shares.is_empty());
        assert_eq!(breakdown.net_total, 0.0);
        assert!(sales_channels(&breakdown.shares).is_empty());
    }
}
