//! Short-code → canonical field name tables, one per Spark response type.
//!
//! Spark serializes every payload with one- or two-letter keys. The canonical
//! names are the broker's own column names, which stay stable across releases.

pub(super) const AUTH_RESULT: &[(&str, &str)] = &[
    ("a", "Status"),
    ("b", "Message"),
    ("c", "UserName"),
    ("d", "DisplayName"),
    ("l", "Token"),
    ("m", "TokenExpiration"),
];

pub(super) const STRUCT_ACCOUNT_TRANSACTION: &[(&str, &str)] = &[
    ("a", "TransactionDate"),
    ("b", "ValueDate"),
    ("c", "ActionType"),
    ("d", "Description"),
    ("e", "SecurityNumber"),
    ("f", "SecurityName"),
    ("g", "Quantity"),
    ("h", "Price"),
    ("i", "Amount"),
    ("j", "Currency"),
    ("k", "Commission"),
    ("l", "Status"),
    ("m", "Reference"),
    ("n", "Balance"),
];

pub(super) const RM_TYPE: &[(&str, &str)] = &[
    ("a", "Sug"),
    ("b", "ID"),
    ("c", "BNO"),
    ("d", "SUG_RC"),
    ("e", "Tik"),
    ("f", "Branch"),
    ("g", "ID_NAME"),
    ("h", "BS_BNO"),
    ("i", "SYMBOL_NAM"),
    ("j", "BNO_NAME"),
    ("k", "SUG_ID"),
    ("l", "SUG_BNO"),
    ("m", "LAST_OP"),
    ("n", "LAST_OP_NAM"),
    ("o", "LAST_DT"),
    ("p", "STRT_DT"),
    ("q", "END_DT"),
    ("r", "AV_TERM"),
    ("s", "MDR"),
    ("t", "MANPIK"),
    ("u", "SORT"),
    ("v", "SH"),
    ("w", "SUG_PR"),
    ("x", "PRC"),
    ("y", "PRC_CHNG"),
    ("z", "SUG_CUR"),
    ("aa", "PR_MATACH"),
    ("ab", "HON_RASHUM"),
    ("ac", "NV"),
    ("ad", "COST"),
    ("ae", "VL"),
    ("af", "EXT_MARGIN"),
    ("ag", "REQ_MARGIN"),
    ("ah", "SUM1"),
    ("ai", "SUM2"),
    ("aj", "ID_PCNT"),
    ("ak", "TK_PCNT"),
    ("al", "LVL1"),
    ("am", "LVL2"),
    ("an", "LVL3"),
    ("ao", "BnoType"),
    ("ap", "SugBno"),
    ("aq", "IsNewStruct"),
];

pub(super) const RM_TOTAL_TYPE: &[(&str, &str)] = &[
    ("a", "TotalValue"),
    ("b", "TotalCost"),
    ("c", "TotalProfit"),
    ("d", "TotalProfitPercent"),
    ("e", "Currency"),
];

pub(super) const SECURITIES_DATA: &[(&str, &str)] = &[
    ("a", "Totals"),
    ("b", "Securities"),
    ("c", "Cash"),
];

pub(super) const SECURITIES_TOTAL_TYPE: &[(&str, &str)] = &[
    ("a", "SecuritiesValue"),
    ("b", "CashValue"),
    ("c", "Margin"),
    ("d", "DailyProfit"),
    ("e", "DailyProfitPercent"),
    ("o", "TotalValue"),
];

pub(super) const CHART_POINT: &[(&str, &str)] = &[("a", "Date"), ("b", "Value"), ("c", "Yield")];
