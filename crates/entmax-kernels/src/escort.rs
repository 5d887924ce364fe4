//! The escort slot of a kernel

use crate::kernel::EntmaxKernel;

/// The (2 - α)-escort of a parameterized kernel.
///
/// Built once per [`EntmaxKernel::set_parameters`] and read-only after.
/// A self-dual kernel stores a marker instead of a copy of itself, so
/// [`EntmaxKernel::escort`] hands back the kernel itself.
#[derive(Debug, Default)]
pub enum Escort {
    /// Not built, or the family has no escort
    #[default]
    None,
    /// The kernel is its own escort
    SelfDual,
    /// An independently parameterized kernel of the escort family
    Kernel(Box<EntmaxKernel>),
}

impl Escort {
    /// Resolve against the owning kernel.
    pub fn resolve<'a>(&'a self, owner: &'a EntmaxKernel) -> Option<&'a EntmaxKernel> {
        match self {
            Self::None => None,
            Self::SelfDual => Some(owner),
            Self::Kernel(kernel) => Some(kernel.as_ref()),
        }
    }
}
