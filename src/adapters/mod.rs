// One adapter per acquisition strategy: authenticated paginated catalog
// (BDO), sitemap-filtered single pages (BPI, EastWest), category crawl
// (ChinaBank). All converge on Vec<BankPromo>.

pub mod bdo;
pub mod chinabank;
pub mod sitemap_bank;
