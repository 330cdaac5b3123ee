// Loss, gradient and Hessian products
pub mod dwd;
// argmin adapter
pub mod objective;
// Linear minimization oracle and projection
pub mod oracle;
