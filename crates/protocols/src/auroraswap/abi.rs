//! Contract bindings generated from human-readable ABIs.
#![allow(missing_docs)]

use ethers::prelude::abigen;

abigen!(
    BrlChef,
    r#"[
        function BRLPerBlock() external view returns (uint256)
        function getMultiplier(uint256 _from, uint256 _to) external view returns (uint256)
        function poolInfo(uint256) external view returns (address lpToken, uint256 allocPoint, uint256 lastRewardBlock, uint256 accBRLPerShare, uint16 depositFeeBP)
        function totalAllocPoint() external view returns (uint256)
    ]"#,
);

abigen!(
    Erc20,
    r#"[
        function balanceOf(address owner) external view returns (uint256)
        function totalSupply() external view returns (uint256)
    ]"#,
);
