/// EIP-1193 provider error: the requested chain has not been added to the wallet.
pub const CHAIN_NOT_ADDED_CODE: i64 = 4902;

/// EIP-1193 provider error: the user rejected the request.
pub const USER_REJECTED_CODE: i64 = 4001;

pub const DEFAULT_WALLET_RPC_URL: &str = "http://127.0.0.1:1248";

pub const DEFAULT_CONFIRMATION_POLL_INTERVAL_MS: u64 = 1_000;

/// Length error messages are cut to when rendered on a single status line.
pub const STATUS_MESSAGE_MAX_LEN: usize = 50;

/// Networks served by the planner backend:
/// (key, name, chain id, symbol, rpc, color, explorer tx prefix).
pub const DEFAULT_CHAINS: &[(&str, &str, u64, &str, &str, &str, &str)] = &[
    ("ethereum", "Ethereum", 1, "ETH", "https://eth.llamarpc.com", "#627EEA", "https://etherscan.io/tx/"),
    ("polygon", "Polygon", 137, "MATIC", "https://polygon-rpc.com", "#8247E5", "https://polygonscan.com/tx/"),
    ("bsc", "BNB Chain", 56, "BNB", "https://bsc-dataseed.binance.org", "#F3BA2F", "https://bscscan.com/tx/"),
    ("arbitrum", "Arbitrum", 42161, "ETH", "https://arb1.arbitrum.io/rpc", "#28A0F0", "https://arbiscan.io/tx/"),
    ("optimism", "Optimism", 10, "ETH", "https://mainnet.optimism.io", "#FF0420", "https://optimistic.etherscan.io/tx/"),
    ("avalanche", "Avalanche", 43114, "AVAX", "https://api.avax.network/ext/bc/C/rpc", "#E84142", "https://snowtrace.io/tx/"),
    ("fantom", "Fantom", 250, "FTM", "https://rpc.ftm.tools", "#1969FF", "https://ftmscan.com/tx/"),
    ("moonbeam", "Moonbeam", 1284, "GLMR", "https://rpc.api.moonbeam.network", "#00D0FF", "https://moonscan.io/tx/"),
    ("celo", "Celo", 42220, "CELO", "https://forno.celo.org", "#FBCC5C", "https://celoscan.io/tx/"),
    ("aurora", "Aurora", 1313161554, "ETH", "https://mainnet.aurora.dev", "#00A9FF", "https://explorer.mainnet.aurora.dev/tx/"),
    ("polygon_zkevm", "Polygon zkEVM", 1101, "ETH", "https://zkevm-rpc.com", "#8247E5", "https://zkevm.polygonscan.com/tx/"),
    ("linea", "Linea", 59144, "ETH", "https://rpc.linea.build", "#5A9BC4", "https://lineascan.build/tx/"),
    ("base", "Base", 8453, "ETH", "https://mainnet.base.org", "#0052FF", "https://basescan.org/tx/"),
    ("scroll", "Scroll", 534352, "ETH", "https://rpc.scroll.io", "#FFD700", "https://scrollscan.com/tx/"),
    ("zksync", "zkSync Era", 324, "ETH", "https://mainnet.era.zksync.io", "#2E2E2E", "https://explorer.zksync.io/tx/"),
];
